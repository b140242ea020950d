//! girder - project dependency-graph resolver
//!
//! girder resolves a project's build dependency graph from declarative
//! `Project.toml` manifests and answers structural queries over it: direct
//! and transitive dependencies, linkable artifacts, resource-bundle
//! ownership, test-target associations, and extension/clip relationships.
//! The resolved graph is the single source of truth for downstream code
//! generation, caching, and build orchestration.
//!
//! # Architecture Overview
//!
//! Resolution happens in two phases with an immutable data structure between
//! them:
//!
//! 1. **Construction**: [`graph::GraphLoader`] recursively walks declared
//!    dependency references starting from a named root target, memoizing
//!    loaded projects and resolved nodes so diamond dependencies converge and
//!    each manifest parses at most once. Referenced binaries, headers, and
//!    module maps must exist on disk; cycles among targets are rejected with
//!    the offending path.
//! 2. **Querying**: [`graph::GraphTraverser`] runs predicate-parameterized
//!    depth-first reachability over the flat, identity-keyed
//!    [`graph::ValueGraph`]: no object pointers, no mutation, and safe for
//!    any number of concurrent readers.
//!
//! Construction errors are fatal to the build pass; query-time absence is an
//! empty result, never an error.
//!
//! # Core Modules
//!
//! - [`core`] - Error taxonomy and user-facing error presentation
//! - [`manifest`] - `Project.toml` model and manifest-source capability
//! - [`project`] - Project, target, and product descriptions
//! - [`graph`] - Graph construction ([`graph::GraphLoader`]) and the query
//!   engine ([`graph::GraphTraverser`])
//! - [`cli`] - The `girder` command-line interface
//! - [`utils`] - Filesystem capability and path normalization
//!
//! # Manifest Format (Project.toml)
//!
//! ```toml
//! name = "App"
//!
//! [[targets]]
//! name = "App"
//! product = "app"
//! dependencies = [
//!     { type = "target", name = "Core" },
//!     { type = "project", name = "Design", path = "../Design" },
//!     { type = "framework", path = "Vendor/Analytics.framework" },
//!     { type = "library", path = "Vendor/libssl.a", public_headers = "Vendor/include" },
//! ]
//!
//! [[targets]]
//! name = "Core"
//! product = "static_library"
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Resolve the graph rooted at a target and print a summary
//! girder resolve --target App
//!
//! # Render the dependency tree
//! girder resolve --target App --tree
//!
//! # Run a classification query
//! girder query static --target App
//! girder query bundles --target App --path ./projects/App
//! ```

pub mod cli;
pub mod core;
pub mod graph;
pub mod manifest;
pub mod project;
pub mod utils;

// test_utils is available to unit tests and, via the feature, to integration
// tests and downstream crates.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
