//! Environment-sourced store configuration.

use std::path::PathBuf;

use crate::storage::{EncryptedFileStore, EnvSecret};

/// Variable holding the document encryption secret.
pub const SECRET_ENV: &str = "JSON_ENCRYPTION_KEY";

/// Variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "AAC_DATA_DIR";

/// Data directory used when `AAC_DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Development secret used when `JSON_ENCRYPTION_KEY` is unset.
///
/// Documents written under it are only as private as this source file.
pub const DEVELOPMENT_SECRET: &str = "default_key_32byteslong!";

/// Where documents live and where their secret comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub secret_env: String,
    /// Fall back to [`DEVELOPMENT_SECRET`] when the secret variable is unset.
    pub allow_development_secret: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            secret_env: SECRET_ENV.to_string(),
            allow_development_secret: true,
        }
    }
}

impl StoreConfig {
    /// Read the data directory from the environment.
    ///
    /// The secret itself is not read here; the opened store reads it on
    /// every operation.
    pub fn from_env() -> Self {
        let data_dir = std::env::var(DATA_DIR_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self {
            data_dir,
            ..Self::default()
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Refuse to run without an explicit secret.
    pub fn require_secret(mut self) -> Self {
        self.allow_development_secret = false;
        self
    }

    /// Open the encrypted store this configuration describes.
    pub fn open(&self) -> EncryptedFileStore {
        let secret = if self.allow_development_secret {
            EnvSecret::with_fallback(&self.secret_env, DEVELOPMENT_SECRET)
        } else {
            EnvSecret::new(&self.secret_env)
        };
        EncryptedFileStore::new(&self.data_dir, secret)
    }
}
