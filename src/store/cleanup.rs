use std::path::Path;

/// Deletes an invalid document from the store
///
/// Only ever invoked for documents the validator classified invalid.
/// A failure is returned to the caller so the file can be reported as
/// still present; nothing disappears silently.
pub fn remove_document(path: &Path) -> std::io::Result<()> {
    std::fs::remove_file(path)
}
