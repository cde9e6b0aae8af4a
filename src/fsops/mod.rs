//! File mutation primitives for scaffolding steps
//!
//! Two operations: whole-file template writes with an explicit overwrite
//! policy, and marker-guarded appends that leave existing bytes untouched.

use crate::core::TaskError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Write `content` to `path`
///
/// When `overwrite` is false and the file already exists, fails with
/// `TaskError::FileExists` instead of clobbering it.
pub fn write_template(path: &Path, content: &str, overwrite: bool) -> Result<(), TaskError> {
    if !overwrite && path.exists() {
        return Err(TaskError::FileExists {
            path: path.to_path_buf(),
        });
    }

    debug!("Writing {} ({} bytes)", path.display(), content.len());
    write_atomic(path, content.as_bytes())
}

/// Append `fragment` to `path` unless `marker` already appears in it
///
/// Returns `true` when the fragment was appended, `false` when the marker
/// was already present and the file was left byte-for-byte untouched.
/// The existing content is never re-serialized or reformatted; the
/// fragment lands after the last pre-existing byte.
pub fn patch_if_absent(path: &Path, marker: &str, fragment: &str) -> Result<bool, TaskError> {
    if !path.exists() {
        return Err(TaskError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let current = fs::read_to_string(path).map_err(|source| TaskError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if current.contains(marker) {
        debug!("Marker already present in {}, leaving file untouched", path.display());
        return Ok(false);
    }

    let mut updated = current;
    updated.push_str(fragment);
    write_atomic(path, updated.as_bytes())?;

    Ok(true)
}

/// Write bytes via a temp file in the same directory, then rename over the
/// target, so readers never observe a half-written file
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), TaskError> {
    let io_err = |source| TaskError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("drydock");
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp, bytes).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;

    Ok(())
}
