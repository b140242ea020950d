//! Graph node identity.
//!
//! Every node in the value graph is identified by a [`Dependency`]: a
//! discriminated kind plus a filesystem location and, for targets, a name.
//! Identity equality is the basis for cache lookups, cycle detection, and set
//! membership in query results, so the enum derives `Hash`/`Eq` over all of
//! its fields and never holds references to other nodes.

use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of one node in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// A buildable target within the project at `path`.
    Target {
        /// Target name, unique within its project.
        name: String,
        /// Directory of the project declaring the target.
        path: PathBuf,
    },
    /// A prebuilt framework on disk.
    Framework {
        /// Absolute path to the framework bundle.
        path: PathBuf,
    },
    /// A prebuilt static or dynamic library on disk.
    Library {
        /// Absolute path to the library binary.
        path: PathBuf,
        /// Absolute path to the public headers directory.
        public_headers: PathBuf,
        /// Absolute path to the module map, if the manifest declared one.
        swift_module_map: Option<PathBuf>,
    },
}

impl Dependency {
    /// A target identity.
    pub fn target(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Dependency::Target {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Whether this identity refers to a target.
    pub fn is_target(&self) -> bool {
        matches!(self, Dependency::Target { .. })
    }

    /// The filesystem location of the node.
    pub fn path(&self) -> &Path {
        match self {
            Dependency::Target { path, .. }
            | Dependency::Framework { path }
            | Dependency::Library { path, .. } => path,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Target { name, path } => {
                write!(f, "target '{}' ({})", name, path.display())
            }
            Dependency::Framework { path } => write!(f, "framework ({})", path.display()),
            Dependency::Library { path, .. } => write!(f, "library ({})", path.display()),
        }
    }
}
