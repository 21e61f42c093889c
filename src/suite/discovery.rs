use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::FixtureError;

/// Returns true if the given path has a .yaml or .yml extension.
fn is_fixture_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Recursively scans a directory for fixture suite files.
///
/// A path naming a single file is returned as-is. The returned list is
/// sorted so suites run in a deterministic order.
pub fn discover_fixture_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, FixtureError> {
    let root = root.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| FixtureError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if root.is_file() || is_fixture_file(path) {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
