//! The flat, identity-keyed graph representation.
//!
//! A [`ValueGraph`] holds no pointers between entities: everything is a small
//! hashable [`Dependency`] identity plus flat lookup tables. That sidesteps
//! cyclic-ownership concerns entirely and makes the graph read-only shareable
//! across threads once construction has finished.
//!
//! The graph lives for one resolution pass. It is built from scratch by
//! [`crate::graph::GraphLoader`] and is never mutated afterwards; the query
//! engine ([`crate::graph::GraphTraverser`]) only reads it.

use crate::graph::dependency::Dependency;
use crate::project::{Project, Target};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Immutable aggregate of one fully-resolved dependency graph.
///
/// Invariant: every [`Dependency::Target`] identity appearing as a key or
/// member of `dependencies` resolves through `projects`/`targets`. A dangling
/// identity is a construction bug, not a runtime condition queries tolerate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueGraph {
    /// Name of the root project.
    pub name: String,
    /// Location of the root project.
    pub path: PathBuf,
    /// Loaded projects by location.
    pub projects: HashMap<PathBuf, Project>,
    /// Targets by location, then by name.
    pub targets: HashMap<PathBuf, HashMap<String, Target>>,
    /// Adjacency table: each resolved identity maps to the identities it
    /// directly points to (leaves map to an empty set).
    pub dependencies: HashMap<Dependency, HashSet<Dependency>>,
}

impl ValueGraph {
    /// Total number of resolved nodes.
    pub fn node_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(HashSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Product;

    #[test]
    fn test_counts() {
        let a = Dependency::target("A", "/p");
        let b = Dependency::target("B", "/p");
        let graph = ValueGraph {
            name: "P".to_string(),
            path: PathBuf::from("/p"),
            projects: HashMap::from([(
                PathBuf::from("/p"),
                Project {
                    path: PathBuf::from("/p"),
                    name: "P".to_string(),
                    targets: vec![
                        Target::new("A", Product::App),
                        Target::new("B", Product::StaticLibrary),
                    ],
                },
            )]),
            targets: HashMap::from([(
                PathBuf::from("/p"),
                HashMap::from([
                    ("A".to_string(), Target::new("A", Product::App)),
                    ("B".to_string(), Target::new("B", Product::StaticLibrary)),
                ]),
            )]),
            dependencies: HashMap::from([
                (a, HashSet::from([b.clone()])),
                (b, HashSet::new()),
            ]),
        };
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
