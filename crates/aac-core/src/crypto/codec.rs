//! AES-256-CBC sealing of single buffers.
//!
//! A sealed buffer is `IV || ciphertext`: 16 random bytes followed by the
//! PKCS#7-padded CBC encryption of the plaintext.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use super::key::DerivedKey;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Length of the initialization vector prefixed to every sealed buffer.
pub const IV_LENGTH: usize = 16;

/// AES block size; ciphertext length is always a non-zero multiple of it.
const BLOCK_SIZE: usize = 16;

/// Reasons a sealed buffer cannot be opened.
///
/// Every variant means corrupt data (or a wrong key); the store reports
/// them as `AacError::CorruptData`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("sealed data is {len} bytes, shorter than the 16-byte IV")]
    TooShort { len: usize },

    #[error("ciphertext length {len} is not a non-zero multiple of 16")]
    Misaligned { len: usize },

    #[error("padding check failed (wrong key or damaged ciphertext)")]
    Padding,
}

/// Encrypt `plain` under `key` with a freshly generated IV.
///
/// Never reuses an IV: each call draws 16 bytes from the OS RNG, so sealing
/// the same plaintext twice produces different output.
pub fn encode(plain: &[u8], key: &DerivedKey) -> Vec<u8> {
    let mut iv = [0u8; IV_LENGTH];
    OsRng.fill_bytes(&mut iv);

    let ciphertext =
        Aes256CbcEnc::new(key.as_bytes().into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plain);

    let mut sealed = Vec::with_capacity(IV_LENGTH + ciphertext.len());
    sealed.extend_from_slice(&iv);
    sealed.extend_from_slice(&ciphertext);
    sealed
}

/// Decrypt a buffer produced by [`encode`].
///
/// # Errors
///
/// - [`CodecError::TooShort`] if the input cannot hold an IV
/// - [`CodecError::Misaligned`] if the ciphertext is empty or not block aligned
/// - [`CodecError::Padding`] if padding validation fails after decryption
pub fn decode(sealed: &[u8], key: &DerivedKey) -> Result<Vec<u8>, CodecError> {
    if sealed.len() < IV_LENGTH {
        return Err(CodecError::TooShort { len: sealed.len() });
    }

    let (iv, ciphertext) = sealed.split_at(IV_LENGTH);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CodecError::Misaligned {
            len: ciphertext.len(),
        });
    }

    let iv: [u8; IV_LENGTH] = iv
        .try_into()
        .map_err(|_| CodecError::TooShort { len: sealed.len() })?;

    Aes256CbcDec::new(key.as_bytes().into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CodecError::Padding)
}
