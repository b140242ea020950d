//! Test doubles for exercising graph construction without a filesystem.
//!
//! Available to unit tests and, via the `test-utils` feature, to integration
//! tests and downstream crates. [`InMemoryManifestSource`] serves manifests
//! from a map and counts loads per location (the idempotent-caching property
//! asserts on those counts); [`StubFileChecker`] answers existence checks
//! from an explicit allow-set.

use crate::core::GirderError;
use crate::manifest::{DependencyManifest, ManifestSource, ProjectManifest, TargetManifest};
use crate::project::Product;
use crate::utils::fs::FileChecker;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// [`ManifestSource`] backed by an in-memory map.
///
/// Clones share the load counters, so a test can hand a clone to the loader
/// and assert on the original.
#[derive(Debug, Clone, Default)]
pub struct InMemoryManifestSource {
    manifests: HashMap<PathBuf, ProjectManifest>,
    loads: Arc<Mutex<HashMap<PathBuf, usize>>>,
}

impl InMemoryManifestSource {
    /// An empty source; every load fails with `ManifestNotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manifest for a project location.
    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>, manifest: ProjectManifest) -> Self {
        self.manifests.insert(path.into(), manifest);
        self
    }

    /// How many times `load` was called for `path`.
    pub fn load_count(&self, path: &Path) -> usize {
        self.loads.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

impl ManifestSource for InMemoryManifestSource {
    fn load(&self, path: &Path) -> Result<ProjectManifest, GirderError> {
        *self.loads.lock().unwrap().entry(path.to_path_buf()).or_insert(0) += 1;
        self.manifests.get(path).cloned().ok_or_else(|| GirderError::ManifestNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// [`FileChecker`] that reports only explicitly registered paths as existing.
#[derive(Debug, Clone, Default)]
pub struct StubFileChecker {
    existing: HashSet<PathBuf>,
}

impl StubFileChecker {
    /// A checker where no path exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path as existing.
    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing.insert(path.into());
        self
    }
}

impl FileChecker for StubFileChecker {
    fn exists(&self, path: &Path) -> bool {
        self.existing.contains(path)
    }
}

/// Shorthand for a [`ProjectManifest`].
pub fn manifest(name: &str, targets: Vec<TargetManifest>) -> ProjectManifest {
    ProjectManifest {
        name: name.to_string(),
        targets,
    }
}

/// Shorthand for a [`TargetManifest`].
pub fn target(name: &str, product: Product, dependencies: Vec<DependencyManifest>) -> TargetManifest {
    TargetManifest {
        name: name.to_string(),
        product,
        dependencies,
    }
}
