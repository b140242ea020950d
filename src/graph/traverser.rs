//! Stateless query engine over a [`ValueGraph`].
//!
//! One generic filtered-reachability primitive ([`GraphTraverser::filter_dependencies`])
//! carries the cycle-safe, visit-once, prune-aware depth-first traversal;
//! every derived query is a thin predicate pair over it or a one-hop lookup
//! into the adjacency table.
//!
//! Queries never fail on absence: asking about a location or target the graph
//! does not contain yields an empty result, because callers probe unknown
//! paths as a matter of course. Only [`GraphTraverser::embeddable_frameworks`]
//! and [`GraphTraverser::linkable_dependencies`] are fallible in their public
//! contract, for future link-error surfacing; their current bodies never fail.
//!
//! The traverser never mutates the graph, so any number of traversers can
//! query one graph concurrently once construction has completed.

use crate::graph::dependency::Dependency;
use crate::graph::value_graph::ValueGraph;
use crate::project::{Product, Project, Target};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// A target paired with its containing project, as returned by queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphTarget {
    /// Location of the project containing the target.
    pub path: PathBuf,
    /// The target description.
    pub target: Target,
    /// The containing project.
    pub project: Project,
}

/// A dependency reference handed to downstream code generation: something the
/// linker, embedder, or copier must be given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GraphDependencyReference {
    /// A built product of another target, referenced by its decorated
    /// product filename.
    Product {
        /// Name of the producing target.
        target: String,
        /// Decorated product filename, e.g. `libCore.a`.
        product_name: String,
    },
}

impl fmt::Display for GraphDependencyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphDependencyReference::Product { target, product_name } => {
                write!(f, "{target} ({product_name})")
            }
        }
    }
}

/// Answers dependency-classification queries over a constructed graph.
pub struct GraphTraverser<'a> {
    graph: &'a ValueGraph,
}

impl<'a> GraphTraverser<'a> {
    /// A traverser borrowing the graph; construction never fails.
    pub fn new(graph: &'a ValueGraph) -> Self {
        Self { graph }
    }

    /// The target `name` in the project at `path`, with its project.
    pub fn target(&self, path: &Path, name: &str) -> Option<GraphTarget> {
        let project = self.graph.projects.get(path)?;
        let target = self.graph.targets.get(path)?.get(name)?;
        Some(GraphTarget {
            path: path.to_path_buf(),
            target: target.clone(),
            project: project.clone(),
        })
    }

    /// All targets of the project at `path`.
    pub fn targets(&self, path: &Path) -> HashSet<GraphTarget> {
        let Some(project) = self.graph.projects.get(path) else {
            return HashSet::new();
        };
        let Some(targets) = self.graph.targets.get(path) else {
            return HashSet::new();
        };
        targets
            .values()
            .map(|target| GraphTarget {
                path: path.to_path_buf(),
                target: target.clone(),
                project: project.clone(),
            })
            .collect()
    }

    /// Direct dependencies of `(path, name)` that are themselves targets,
    /// each paired with its own project.
    ///
    /// One-hop lookup, not a traversal. Unknown locations or names yield an
    /// empty set.
    pub fn direct_target_dependencies(&self, path: &Path, name: &str) -> HashSet<GraphTarget> {
        let Some(dependencies) = self.graph.dependencies.get(&Dependency::target(name, path))
        else {
            return HashSet::new();
        };
        dependencies.iter().filter_map(|dependency| self.graph_target(dependency)).collect()
    }

    /// Bundle-product targets reachable from `(path, name)` that belong to it
    /// as resource bundles.
    ///
    /// A resource-capable target encountered on the way is a boundary: a
    /// bundle behind it belongs to *that* target, not to the root, so descent
    /// is pruned there. Empty when the root target cannot host resources
    /// itself.
    pub fn resource_bundle_dependencies(&self, path: &Path, name: &str) -> HashSet<GraphTarget> {
        let Some(target) = self.graph.targets.get(path).and_then(|t| t.get(name)) else {
            return HashSet::new();
        };
        if !target.supports_resources() {
            return HashSet::new();
        }

        let is_bundle = |dependency: &Dependency| {
            self.target_from(dependency).is_some_and(|t| t.product == Product::Bundle)
        };
        let can_host_resources = |dependency: &Dependency| {
            self.target_from(dependency).is_some_and(Target::supports_resources)
        };

        let bundles =
            self.filter_dependencies(&Dependency::target(name, path), is_bundle, can_host_resources);
        bundles.iter().filter_map(|dependency| self.graph_target(dependency)).collect()
    }

    /// Test-bundle targets in the *same* project whose direct dependencies
    /// include `(path, name)`.
    pub fn test_targets_depending_on(&self, path: &Path, name: &str) -> HashSet<GraphTarget> {
        let Some(targets) = self.graph.targets.get(path) else {
            return HashSet::new();
        };
        let wanted = Dependency::target(name, path);
        targets
            .values()
            .filter(|t| t.product.is_tests_bundle())
            .filter(|t| {
                self.graph
                    .dependencies
                    .get(&Dependency::target(&t.name, path))
                    .is_some_and(|deps| deps.contains(&wanted))
            })
            .filter_map(|t| self.graph_target(&Dependency::target(&t.name, path)))
            .collect()
    }

    /// Direct dependencies of `(path, name)` that are extension products.
    pub fn app_extension_dependencies(&self, path: &Path, name: &str) -> HashSet<GraphTarget> {
        const VALID_PRODUCTS: [Product; 4] = [
            Product::AppExtension,
            Product::StickerPackExtension,
            Product::WatchExtension,
            Product::MessagesExtension,
        ];
        self.direct_target_dependencies(path, name)
            .into_iter()
            .filter(|gt| VALID_PRODUCTS.contains(&gt.target.product))
            .collect()
    }

    /// The app-clip direct dependency of `(path, name)`, if any. When several
    /// exist, which one is returned is unspecified.
    pub fn app_clips_dependency(&self, path: &Path, name: &str) -> Option<GraphTarget> {
        self.direct_target_dependencies(path, name)
            .into_iter()
            .find(|gt| gt.target.product == Product::AppClip)
    }

    /// Direct target dependencies of `(path, name)` with statically linked
    /// products, as linkable product references.
    pub fn direct_static_dependencies(
        &self,
        path: &Path,
        name: &str,
    ) -> HashSet<GraphDependencyReference> {
        let Some(dependencies) = self.graph.dependencies.get(&Dependency::target(name, path))
        else {
            return HashSet::new();
        };
        dependencies
            .iter()
            .filter_map(|dependency| self.target_from(dependency))
            .filter(|t| t.product.is_static())
            .map(|t| GraphDependencyReference::Product {
                target: t.name.clone(),
                product_name: t.product_name(),
            })
            .collect()
    }

    /// The full transitive closure of every target in the project at `path`.
    pub fn all_dependencies(&self, path: &Path) -> HashSet<Dependency> {
        let Some(targets) = self.graph.targets.get(path) else {
            return HashSet::new();
        };

        let mut references = HashSet::new();
        for target in targets.values() {
            let root = Dependency::target(&target.name, path);
            references.extend(self.filter_dependencies(&root, |_| true, |_| false));
        }
        references
    }

    /// Frameworks that must be embedded into the product of `(path, name)`.
    ///
    /// Not yet implemented: returns an empty set, never an error. Fallible in
    /// signature so link errors can surface here later without a contract
    /// change.
    pub fn embeddable_frameworks(
        &self,
        _path: &Path,
        _name: &str,
    ) -> Result<HashSet<GraphDependencyReference>, crate::core::GirderError> {
        Ok(HashSet::new())
    }

    /// Everything the linker must be given for `(path, name)`.
    ///
    /// Not yet implemented: returns an empty set, never an error. Fallible in
    /// signature so link errors can surface here later without a contract
    /// change.
    pub fn linkable_dependencies(
        &self,
        _path: &Path,
        _name: &str,
    ) -> Result<HashSet<GraphDependencyReference>, crate::core::GirderError> {
        Ok(HashSet::new())
    }

    /// Products that must be copied into the product of `(path, name)`.
    ///
    /// Not yet implemented: returns an empty set.
    pub fn copy_product_dependencies(
        &self,
        _path: &Path,
        _name: &str,
    ) -> HashSet<GraphDependencyReference> {
        HashSet::new()
    }

    /// Public-headers folders of the libraries `(path, name)` depends on.
    ///
    /// Not yet implemented: returns an empty set.
    pub fn libraries_public_headers_folders(&self, _path: &Path, _name: &str) -> HashSet<PathBuf> {
        HashSet::new()
    }

    /// Library search paths for `(path, name)`.
    ///
    /// Not yet implemented: returns an empty set.
    pub fn libraries_search_paths(&self, _path: &Path, _name: &str) -> HashSet<PathBuf> {
        HashSet::new()
    }

    /// Swift include paths for the libraries `(path, name)` depends on.
    ///
    /// Not yet implemented: returns an empty set.
    pub fn libraries_swift_include_paths(&self, _path: &Path, _name: &str) -> HashSet<PathBuf> {
        HashSet::new()
    }

    /// Run-path search paths for `(path, name)`.
    ///
    /// Not yet implemented: returns an empty set.
    pub fn run_path_search_paths(&self, _path: &Path, _name: &str) -> HashSet<PathBuf> {
        HashSet::new()
    }

    /// Collects the reachable dependencies selected by `test`, pruning
    /// descent below any node for which `skip` returns true.
    ///
    /// Iterative depth-first traversal with an explicit stack and a visited
    /// set: each identity is processed at most once no matter how many paths
    /// reach it, so diamonds and cycles terminate. The root is
    /// never tested and never included. `test` and `skip` are evaluated
    /// independently of each other, so a node can be included yet pruned, or
    /// excluded yet traversed through. Sibling order is unspecified.
    pub fn filter_dependencies(
        &self,
        from: &Dependency,
        test: impl Fn(&Dependency) -> bool,
        skip: impl Fn(&Dependency) -> bool,
    ) -> HashSet<Dependency> {
        let mut stack = vec![from.clone()];
        let mut visited: HashSet<Dependency> = HashSet::new();
        let mut references = HashSet::new();

        while let Some(node) = stack.pop() {
            if visited.contains(&node) {
                continue;
            }
            visited.insert(node.clone());

            if node != *from {
                if test(&node) {
                    references.insert(node.clone());
                }
                if skip(&node) {
                    continue;
                }
            }

            if let Some(children) = self.graph.dependencies.get(&node) {
                for child in children {
                    if !visited.contains(child) {
                        stack.push(child.clone());
                    }
                }
            }
        }

        references
    }

    /// The target description behind a dependency identity, if it is one.
    fn target_from(&self, dependency: &Dependency) -> Option<&Target> {
        let Dependency::Target { name, path } = dependency else {
            return None;
        };
        self.graph.targets.get(path)?.get(name)
    }

    /// Resolve a target identity to a full target+project pair.
    fn graph_target(&self, dependency: &Dependency) -> Option<GraphTarget> {
        let Dependency::Target { name, path } = dependency else {
            return None;
        };
        self.target(path, name)
    }
}
