//! Dependency graph construction and querying.
//!
//! The graph subsystem has two halves with a single data structure between
//! them:
//!
//! - [`GraphLoader`] resolves manifests into a [`ValueGraph`]: recursive
//!   descent over declared dependency references with per-pass memoization
//!   ([`NodeCache`]), on-disk existence validation, and cycle rejection.
//! - [`GraphTraverser`] answers classification queries over a finished
//!   [`ValueGraph`]: direct and transitive dependencies, resource-bundle
//!   ownership, test-target associations, extension/clip relationships, and
//!   static linkage.
//!
//! The graph is expressed as flat, identity-keyed adjacency data
//! ([`Dependency`] identities in hash maps), not object pointers, so it is
//! immutable and trivially shareable once construction completes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use girder::graph::{GraphLoader, GraphTraverser};
//! use std::path::Path;
//!
//! let path = Path::new("/projects/App");
//! let graph = GraphLoader::new().load_target("App", path)?;
//! let traverser = GraphTraverser::new(&graph);
//! for dep in traverser.direct_target_dependencies(path, "App") {
//!     println!("{} depends on {}", "App", dep.target.name);
//! }
//! # Ok::<(), girder::core::GirderError>(())
//! ```

pub mod dependency;
pub mod loader;
pub mod traverser;
pub mod value_graph;

pub use dependency::Dependency;
pub use loader::{GraphLoader, NodeCache};
pub use traverser::{GraphDependencyReference, GraphTarget, GraphTraverser};
pub use value_graph::ValueGraph;
