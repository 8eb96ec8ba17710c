//! Write-then-rename output files
//!
//! Outputs are staged in a temporary file next to the destination and only
//! renamed over it once fully written, so a failed conversion never leaves a
//! partial file behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Atomically replace `path` with `contents`
///
/// An existing destination keeps its permissions.
///
/// # Errors
/// Returns an error if the temporary file cannot be created, written, or
/// renamed over the destination.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    if let Ok(metadata) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(metadata.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
