//! Filesystem utilities for atomic whole-file replacement.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Suffix carried by in-flight temporary files.
pub(crate) const TEMP_SUFFIX: &str = ".tmp";

/// Replace `destination` with `data` so readers see either the old or the new
/// contents, never a partial write.
///
/// The bytes go to a dot-prefixed temp file next to the destination, are
/// synced, then renamed over it. The parent directory is created if missing.
pub fn write_atomic(destination: &Path, data: &[u8]) -> io::Result<()> {
    let parent = destination.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent")
    })?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(destination)?;
    let result = (|| {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()
    })();
    if let Err(err) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    rename_with_fallback(&temp_path, destination)
}

fn temp_path_for(destination: &Path) -> io::Result<PathBuf> {
    let filename = destination
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid filename"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("System time error: {}", e)))?
        .as_nanos();
    Ok(destination.with_file_name(format!(
        ".{}.{}.{}{}",
        filename,
        std::process::id(),
        nanos,
        TEMP_SUFFIX
    )))
}

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On Windows, `fs::rename` can refuse to replace an existing destination.
/// Only that refusal triggers remove-then-retry; any other failure leaves the
/// destination untouched. If the rename ultimately fails, the temp file is
/// cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    let initial_err = match fs::rename(temp_path, destination) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };

    if !target_blocks_rename(&initial_err) {
        let _ = fs::remove_file(temp_path);
        return Err(initial_err);
    }

    let _ = fs::remove_file(destination);
    fs::rename(temp_path, destination).map_err(|retry_err| {
        let _ = fs::remove_file(temp_path);
        io::Error::new(
            retry_err.kind(),
            format!(
                "Atomic rename failed (initial: {}, retry: {})",
                initial_err, retry_err
            ),
        )
    })
}

#[cfg(windows)]
fn target_blocks_rename(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
    )
}

// POSIX rename replaces the target atomically; a failure is never about it existing.
#[cfg(not(windows))]
fn target_blocks_rename(_err: &io::Error) -> bool {
    false
}
