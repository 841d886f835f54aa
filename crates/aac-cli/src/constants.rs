//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Record not found in its collection.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Missing encryption secret.
    pub const MISSING_SECRET: i32 = 5;

    /// A stored document could not be decrypted or parsed.
    pub const INTEGRITY_FAILED: i32 = 6;
}
