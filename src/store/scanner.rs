use std::path::{Path, PathBuf};

/// Recursively enumerates stored files matching the target extension
///
/// The suffix match is case-sensitive on the extension exactly as given;
/// canonical names are lowercase, so callers pass a lowercase extension.
/// The result is sorted lexicographically, making the order deterministic
/// for a fixed directory state.
///
/// # Arguments
///
/// * `root` - The store directory to walk
/// * `extension` - Filename suffix to match, including the leading dot
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Absolute paths of matching regular files; empty
///   when the root does not exist
/// * `Err(std::io::Error)` - A directory could not be read
pub fn scan_store(root: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let root = root.canonicalize()?;
    let mut found = Vec::new();
    walk(&root, extension, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk(&path, extension, found)?;
        } else if file_type.is_file() && has_suffix(&path, extension) {
            found.push(path);
        }
    }
    Ok(())
}

fn has_suffix(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(extension))
}
