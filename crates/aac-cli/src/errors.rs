//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use aac_core::AacError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug, Clone)]
pub enum CliError {
    /// Record not found by id
    NotFound { message: String, hint: String },

    /// Stored data could not be decrypted or parsed
    Corrupt { message: String, hint: String },

    /// No secret configured while one is required
    MissingSecret { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint }
            | CliError::Corrupt { message, hint }
            | CliError::MissingSecret { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create a Corrupt error with message and hint.
    pub fn corrupt(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::Corrupt {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Classify an error bubbling out of a command handler.
    ///
    /// Core store errors that operators must act on get their own exit code;
    /// anything else stays a general failure.
    pub fn classify(err: &anyhow::Error) -> Option<CliError> {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            return Some(cli_err.clone());
        }
        match err.downcast_ref::<AacError>()? {
            AacError::CorruptData { .. } => Some(CliError::corrupt(
                err.to_string(),
                "Hint: Check JSON_ENCRYPTION_KEY matches the secret the data was written with, or run `aac doctor`.",
            )),
            AacError::MissingSecret(var) => Some(CliError::MissingSecret {
                message: err.to_string(),
                hint: format!("Hint: Export {} before running this command.", var),
            }),
            AacError::InvalidName(_) => Some(CliError::invalid_input(err.to_string())),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::Corrupt { .. } => exit_codes::INTEGRITY_FAILED,
            CliError::MissingSecret { .. } => exit_codes::MISSING_SECRET,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}
