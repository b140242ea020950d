//! Graph construction: recursive manifest resolution with memoization.
//!
//! [`GraphLoader`] walks declared dependency references starting from a named
//! root target, resolving each reference into a node identity, consulting and
//! populating a per-pass [`NodeCache`], and validating that referenced files
//! exist on disk. The result is an immutable [`ValueGraph`].
//!
//! # Resolution Algorithm
//!
//! For a `(name, location)` pair:
//!
//! 1. Return immediately if the identity is already in the cache (this is the
//!    mechanism that makes diamond dependencies converge to one node).
//! 2. Fail with [`GirderError::CyclicDependency`] if the identity is already
//!    on the in-progress resolution stack. The "currently resolving" stack is
//!    deliberately distinct from the "already resolved" cache: in-progress
//!    re-entry is a cycle, completed re-entry is a cache hit.
//! 3. Load the owning project via the [`ManifestSource`], cache-checked at the
//!    project granularity so each manifest is parsed at most once per pass.
//! 4. Resolve each declared dependency reference by kind (`target`, `project`,
//!    `framework`, `library`); anything else is
//!    [`GirderError::UnknownDependencyKind`].
//! 5. Record the target's adjacency entry only after all of its dependencies
//!    resolved, then insert it into the cache.
//!
//! Any error aborts the whole build pass; there is no partial-graph recovery.
//!
//! # Concurrency
//!
//! Construction is synchronous and single-threaded: existence checks and
//! manifest parsing are blocking calls on the invoking thread. Each build
//! pass owns its own cache, so separate passes share no state. The finished
//! [`ValueGraph`] is read-only and safe for concurrent readers.

use crate::core::GirderError;
use crate::graph::dependency::Dependency;
use crate::graph::value_graph::ValueGraph;
use crate::manifest::{DependencyManifest, ManifestSource, ProjectManifest, TomlManifestSource};
use crate::project::{Project, Target};
use crate::utils::fs::{normalize_path, FileChecker, StdFileChecker};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Per-pass memoization of resolved nodes and loaded projects.
///
/// Single writer within one construction pass, no cross-pass persistence.
/// Prevents re-parsing a manifest already visited on another branch of the
/// graph and makes shared dependencies converge to the same node identity.
#[derive(Debug, Default)]
pub struct NodeCache {
    projects: HashMap<PathBuf, Project>,
    resolved: HashSet<Dependency>,
}

impl NodeCache {
    /// Look up an already-resolved node identity.
    pub fn contains(&self, dependency: &Dependency) -> bool {
        self.resolved.contains(dependency)
    }

    /// Record a fully-resolved node identity.
    pub fn insert(&mut self, dependency: Dependency) {
        self.resolved.insert(dependency);
    }

    /// Look up an already-loaded project by location.
    pub fn project(&self, path: &Path) -> Option<&Project> {
        self.projects.get(path)
    }

    /// Record a loaded project.
    pub fn insert_project(&mut self, project: Project) {
        self.projects.insert(project.path.clone(), project);
    }
}

/// Mutable state threaded through one resolution pass.
#[derive(Debug, Default)]
struct LoadState {
    cache: NodeCache,
    /// Parsed manifests by location; the dependency lists live here.
    manifests: HashMap<PathBuf, ProjectManifest>,
    /// Targets currently being resolved, outermost first.
    resolving: Vec<(String, PathBuf)>,
    targets: HashMap<PathBuf, HashMap<String, Target>>,
    dependencies: HashMap<Dependency, HashSet<Dependency>>,
}

/// Builds a [`ValueGraph`] from manifests on disk (or from whatever the
/// injected [`ManifestSource`] serves).
///
/// # Examples
///
/// ```rust,no_run
/// use girder::graph::GraphLoader;
/// use std::path::Path;
///
/// let graph = GraphLoader::new().load_target("App", Path::new("/projects/App"))?;
/// println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
/// # Ok::<(), girder::core::GirderError>(())
/// ```
pub struct GraphLoader<M = TomlManifestSource, F = StdFileChecker> {
    manifests: M,
    files: F,
}

impl GraphLoader {
    /// A loader reading `Project.toml` files and checking the real filesystem.
    pub fn new() -> Self {
        Self {
            manifests: TomlManifestSource,
            files: StdFileChecker,
        }
    }
}

impl Default for GraphLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ManifestSource, F: FileChecker> GraphLoader<M, F> {
    /// A loader with injected manifest and filesystem capabilities.
    pub fn with_sources(manifests: M, files: F) -> Self {
        Self { manifests, files }
    }

    /// Resolve the graph rooted at target `name` in the project at `path`.
    ///
    /// Fails with [`GirderError::TargetNotFound`] if the manifest does not
    /// declare the target, [`GirderError::MissingFile`] if a referenced
    /// artifact is absent from disk, [`GirderError::CyclicDependency`] if a
    /// target transitively depends on itself, and
    /// [`GirderError::UnknownDependencyKind`] for unrecognized reference
    /// types.
    pub fn load_target(&self, name: &str, path: &Path) -> Result<ValueGraph, GirderError> {
        let path = normalize_path(path);
        debug!(name, path = %path.display(), "resolving dependency graph");

        let mut state = LoadState::default();
        self.resolve_target(name, &path, &mut state)?;

        let project_name = state
            .cache
            .project(&path)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        debug!(
            nodes = state.dependencies.len(),
            projects = state.cache.projects.len(),
            "dependency graph resolved"
        );

        Ok(ValueGraph {
            name: project_name,
            path,
            projects: state.cache.projects,
            targets: state.targets,
            dependencies: state.dependencies,
        })
    }

    /// Resolve one target node, recursing into its declared dependencies.
    fn resolve_target(
        &self,
        name: &str,
        path: &Path,
        state: &mut LoadState,
    ) -> Result<Dependency, GirderError> {
        let identity = Dependency::target(name, path);
        if state.cache.contains(&identity) {
            trace!(name, path = %path.display(), "target cache hit");
            return Ok(identity);
        }

        if let Some(start) = state.resolving.iter().position(|(n, p)| n == name && p == path) {
            let mut cycle: Vec<&str> =
                state.resolving[start..].iter().map(|(n, _)| n.as_str()).collect();
            cycle.push(name);
            return Err(GirderError::CyclicDependency {
                cycle: cycle.join(" -> "),
            });
        }
        state.resolving.push((name.to_string(), path.to_path_buf()));

        self.load_project(path, state)?;
        let target = state
            .manifests
            .get(path)
            .and_then(|m| m.targets.iter().find(|t| t.name == name))
            .cloned()
            .ok_or_else(|| GirderError::TargetNotFound {
                name: name.to_string(),
                path: path.to_path_buf(),
            })?;

        let mut children = HashSet::with_capacity(target.dependencies.len());
        for reference in &target.dependencies {
            children.insert(self.resolve_dependency(reference, path, state)?);
        }

        state.resolving.pop();
        state.dependencies.insert(identity.clone(), children);
        state.cache.insert(identity.clone());
        trace!(name, "target resolved");
        Ok(identity)
    }

    /// Load the project at `path` into the cache, parsing its manifest at
    /// most once per pass.
    fn load_project(&self, path: &Path, state: &mut LoadState) -> Result<(), GirderError> {
        if state.cache.project(path).is_some() {
            trace!(path = %path.display(), "project cache hit");
            return Ok(());
        }

        debug!(path = %path.display(), "loading project manifest");
        let manifest = self.manifests.load(path)?;
        // Sources other than TomlManifestSource may not have validated yet.
        manifest.validate(path)?;

        let targets: Vec<Target> =
            manifest.targets.iter().map(|t| Target::new(&t.name, t.product)).collect();
        state.targets.insert(
            path.to_path_buf(),
            targets.iter().map(|t| (t.name.clone(), t.clone())).collect(),
        );
        state.cache.insert_project(Project {
            path: path.to_path_buf(),
            name: manifest.name.clone(),
            targets,
        });
        state.manifests.insert(path.to_path_buf(), manifest);
        Ok(())
    }

    /// Resolve one declared dependency reference by kind.
    fn resolve_dependency(
        &self,
        reference: &DependencyManifest,
        project_path: &Path,
        state: &mut LoadState,
    ) -> Result<Dependency, GirderError> {
        match reference.kind.as_str() {
            "target" => {
                let name = require_field(reference, project_path, "name", &reference.name)?;
                self.resolve_target(name, project_path, state)
            }
            "project" => {
                let name = require_field(reference, project_path, "name", &reference.name)?.clone();
                let relative = require_field(reference, project_path, "path", &reference.path)?;
                let target_path = normalize_path(&project_path.join(relative));
                self.resolve_target(&name, &target_path, state)
            }
            "framework" => {
                let relative = require_field(reference, project_path, "path", &reference.path)?;
                let path = normalize_path(&project_path.join(relative));
                if !self.files.exists(&path) {
                    return Err(GirderError::MissingFile { path });
                }
                let identity = Dependency::Framework { path };
                self.insert_leaf(identity.clone(), state);
                Ok(identity)
            }
            "library" => {
                let relative = require_field(reference, project_path, "path", &reference.path)?;
                let headers_relative =
                    require_field(reference, project_path, "public_headers", &reference.public_headers)?;
                let path = normalize_path(&project_path.join(relative));
                if !self.files.exists(&path) {
                    return Err(GirderError::MissingFile { path });
                }
                let public_headers = normalize_path(&project_path.join(headers_relative));
                if !self.files.exists(&public_headers) {
                    return Err(GirderError::MissingFile { path: public_headers });
                }
                let swift_module_map = match &reference.swift_module_map {
                    Some(relative) => {
                        let map = normalize_path(&project_path.join(relative));
                        if !self.files.exists(&map) {
                            return Err(GirderError::MissingFile { path: map });
                        }
                        Some(map)
                    }
                    None => None,
                };
                let identity = Dependency::Library {
                    path,
                    public_headers,
                    swift_module_map,
                };
                self.insert_leaf(identity.clone(), state);
                Ok(identity)
            }
            kind => Err(GirderError::UnknownDependencyKind {
                kind: kind.to_string(),
                path: project_path.to_path_buf(),
            }),
        }
    }

    /// Cache a leaf node and give it an (empty) adjacency entry.
    fn insert_leaf(&self, identity: Dependency, state: &mut LoadState) {
        if !state.cache.contains(&identity) {
            trace!(node = %identity, "leaf node resolved");
            state.dependencies.entry(identity.clone()).or_default();
            state.cache.insert(identity);
        }
    }
}

/// Pull a required field out of a dependency reference, or report which field
/// the manifest left out.
fn require_field<'a, T>(
    reference: &DependencyManifest,
    project_path: &Path,
    field: &str,
    value: &'a Option<T>,
) -> Result<&'a T, GirderError> {
    value.as_ref().ok_or_else(|| GirderError::ManifestValidationError {
        reason: format!(
            "'{}' dependency in project at {} is missing required field '{}'",
            reference.kind,
            project_path.display(),
            field
        ),
    })
}
