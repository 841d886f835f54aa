//! Application context for the AAC CLI.
//!
//! Resolves the store configuration from CLI flags and the environment.

use std::path::PathBuf;

use aac_core::config::SECRET_ENV;
use aac_core::{EncryptedFileStore, StoreConfig};

use crate::cli::Cli;

/// Bundles CLI args with the store configuration they resolve to.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: StoreConfig,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        let mut config = StoreConfig::from_env();
        if let Some(dir) = &cli.data_dir {
            config = config.with_data_dir(dir);
        }
        if cli.require_secret {
            config = config.require_secret();
        }
        Self { cli, config }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.config.data_dir
    }

    /// Whether documents will be sealed with the built-in development secret.
    pub fn using_development_secret(&self) -> bool {
        let unset = std::env::var(SECRET_ENV)
            .map(|value| value.is_empty())
            .unwrap_or(true);
        unset && self.config.allow_development_secret
    }

    pub fn open_store(&self) -> EncryptedFileStore {
        self.config.open()
    }
}
