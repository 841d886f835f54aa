//! Key derivation from the configured secret.
//!
//! The secret is hashed with SHA-256 so that secrets of any length map onto
//! the 32 bytes AES-256 requires.

use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// A cryptographic key derived from the store secret.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the document encryption key from a secret.
///
/// Deterministic and infallible: the same secret always yields the same key.
/// The store calls this once per operation rather than caching the result,
/// so a changed secret applies to the very next read or write.
///
/// # Examples
///
/// ```
/// use aac_core::crypto::derive_key;
///
/// let a = derive_key("household-secret");
/// let b = derive_key("household-secret");
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
pub fn derive_key(secret: &str) -> DerivedKey {
    let digest = Sha256::digest(secret.as_bytes());
    let mut key_bytes = [0u8; KEY_LENGTH];
    key_bytes.copy_from_slice(&digest);
    DerivedKey::from_bytes(key_bytes)
}
