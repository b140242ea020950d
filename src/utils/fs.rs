//! File-existence checking.
//!
//! The graph loader validates that every declared framework binary, library
//! binary, headers directory, and module map exists before it constructs the
//! corresponding node. Existence, not content, is what gets validated, so the
//! capability is a single-method trait that tests can stub without touching
//! a real filesystem.

use std::path::{Component, Path, PathBuf};

/// Capability to answer "does this path exist?".
pub trait FileChecker {
    /// Whether `path` exists on disk.
    fn exists(&self, path: &Path) -> bool;
}

/// Default [`FileChecker`] backed by [`std::path::Path::exists`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileChecker;

impl FileChecker for StdFileChecker {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Normalizes a path by resolving `.` and `..` components lexically, without
/// touching the filesystem.
///
/// Node identities are compared structurally, so two manifests reaching the
/// same project through different relative spellings (`../Design` vs
/// `../../apps/../Design`) must normalize to the same location.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                components.pop();
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_resolves_dots() {
        assert_eq!(normalize_path(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize_path(Path::new("/a/./b")), PathBuf::from("/a/b"));
        assert_eq!(
            normalize_path(Path::new("/apps/App/../../apps/Design")),
            PathBuf::from("/apps/Design")
        );
    }

    #[test]
    fn test_std_checker_reports_real_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib.a");
        assert!(!StdFileChecker.exists(&file));
        std::fs::write(&file, b"").unwrap();
        assert!(StdFileChecker.exists(&file));
    }
}
