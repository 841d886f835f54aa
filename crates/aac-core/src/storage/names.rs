//! Document name validation.

use crate::error::{AacError, Result};

/// Check that `name` is a single plain filename inside the data directory.
///
/// Rejects empty names, path separators, `.`/`..`, NUL bytes and any name
/// starting with `.` (reserved for in-flight temp files).
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(AacError::InvalidName(name.to_string()));
    }
    Ok(())
}
