//! Error types for AAC core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! A document that has never been written is not an error (reads return
//! `None`); a document that exists but cannot be decrypted or parsed always
//! is. The CLI layer maps these to user-facing messages and exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for AAC core operations.
pub type Result<T> = std::result::Result<T, AacError>;

/// Core error type for AAC core operations.
#[derive(Debug, Error)]
pub enum AacError {
    /// Document exists but is undecryptable or not valid JSON
    #[error("Corrupt document {name}: {reason}")]
    CorruptData { name: String, reason: String },

    /// Filesystem failure while reading or writing a document
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document name is not a single plain filename
    #[error("Invalid document name: {0:?}")]
    InvalidName(String),

    /// No secret configured and no fallback allowed
    #[error("Encryption secret is not set (expected in {0})")]
    MissingSecret(String),

    /// Value could not be serialized to JSON before writing
    #[error("Failed to serialize document {name}: {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AacError {
    pub(crate) fn corrupt(name: &str, reason: impl ToString) -> Self {
        AacError::CorruptData {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AacError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error means stored data could not be decrypted or parsed.
    ///
    /// Callers use this to tell "something is broken" apart from plain I/O
    /// trouble; neither is ever the same as "nothing saved yet".
    pub fn is_corrupt(&self) -> bool {
        matches!(self, AacError::CorruptData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_message_names_document() {
        let err = AacError::corrupt("people.json", "padding check failed");
        assert!(err.is_corrupt());
        assert_eq!(
            err.to_string(),
            "Corrupt document people.json: padding check failed"
        );
    }

    #[test]
    fn test_io_is_not_corrupt() {
        let err = AacError::io(
            "data/people.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_corrupt());
        assert!(err.to_string().contains("data/people.json"));
    }
}
