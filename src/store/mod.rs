//! Store directory management
//!
//! The store directory is the pipeline's only shared mutable resource: the
//! fetcher writes into it, the scanner enumerates it, and cleanup deletes
//! from it. This module owns its creation, the sweep of stale partial
//! downloads, scanning, and removal.

mod cleanup;
mod scanner;

pub use cleanup::remove_document;
pub use scanner::scan_store;

use std::path::Path;

/// Suffix appended to in-flight download files
///
/// Partial files live next to their target and are renamed into place on
/// completion; the suffix keeps the scanner from ever seeing them.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Creates the store root if it does not exist
///
/// Failure here is fatal to the run: nothing downstream can proceed
/// without a writable store.
pub fn ensure_root(root: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(root)
}

/// Removes partial download files left behind by an aborted run
///
/// # Returns
///
/// The number of swept files. A missing root sweeps nothing.
pub fn sweep_partials(root: &Path) -> std::io::Result<usize> {
    if !root.exists() {
        return Ok(0);
    }

    let mut swept = 0;
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        let is_partial = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(PARTIAL_SUFFIX));

        if entry.file_type()?.is_file() && is_partial {
            std::fs::remove_file(&path)?;
            tracing::debug!("Swept stale partial download: {}", path.display());
            swept += 1;
        }
    }

    Ok(swept)
}
