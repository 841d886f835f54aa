//! Cryptographic operations for the document store.
//!
//! - **SHA-256** normalizes an arbitrary-length secret into an AES-256 key
//! - **AES-256-CBC** with PKCS#7 padding seals each document
//!
//! ## Security Model
//!
//! - One fresh random IV per sealed buffer, stored in front of the ciphertext
//! - Keys are derived on every operation and zeroized on drop
//! - No key rotation: a changed secret makes earlier documents unreadable
//!
//! ## Threat Model
//!
//! We defend against:
//! - Disclosure of personal data from a copied data directory
//!
//! We do NOT defend against:
//! - Tampering that happens to keep padding and JSON valid (no MAC)
//! - Offline guessing of weak secrets (no slow KDF)
//! - Compromised host / access to the running process

pub mod codec;
pub mod key;

pub use codec::{decode, encode, CodecError, IV_LENGTH};
pub use key::{derive_key, DerivedKey};
