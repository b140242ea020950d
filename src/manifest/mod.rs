//! Manifest file parsing and validation for girder projects.
//!
//! A project is described by a `Project.toml` manifest in its directory. The
//! manifest declares the project name and its targets, and each target lists
//! the dependencies the graph loader resolves into nodes.
//!
//! # Basic Structure
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
//! # Dependency Types
//!
//! - **target**: another target in the *same* project.
//! - **project**: a target in another project, located by a path relative to
//!   the declaring project's directory.
//! - **framework**: a prebuilt framework on disk (existence validated at
//!   graph-construction time).
//! - **library**: a prebuilt static/dynamic library with a required
//!   `public_headers` directory and an optional `swift_module_map` file.
//!
//! The `type` field is kept as a plain string here: classification (and the
//! rejection of unknown kinds) belongs to the graph loader, which reports
//! [`GirderError::UnknownDependencyKind`] with the declaring project's path.
//!
//! # Integration
//!
//! Works with [`crate::graph::GraphLoader`], which calls a [`ManifestSource`]
//! at most once per distinct project location per build pass.

use crate::core::GirderError;
use crate::project::Product;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Manifest filename expected in every project directory.
pub const MANIFEST_FILENAME: &str = "Project.toml";

/// One dependency reference as written in a manifest.
///
/// Which optional fields are required depends on `kind`; the graph loader
/// enforces that when it classifies the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    /// Dependency kind: `"target"`, `"project"`, `"framework"`, or `"library"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Target name, for `target` and `project` references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Path relative to the declaring project's directory: another project's
    /// directory, a framework bundle, or a library binary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Public headers directory, required for `library` references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_headers: Option<PathBuf>,
    /// Optional module map file for `library` references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift_module_map: Option<PathBuf>,
}

impl DependencyManifest {
    /// A `target` reference to a target in the same project.
    pub fn target(name: impl Into<String>) -> Self {
        Self {
            kind: "target".to_string(),
            name: Some(name.into()),
            path: None,
            public_headers: None,
            swift_module_map: None,
        }
    }

    /// A `project` reference to a target in another project.
    pub fn project(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: "project".to_string(),
            name: Some(name.into()),
            path: Some(path.into()),
            public_headers: None,
            swift_module_map: None,
        }
    }

    /// A `framework` reference to a prebuilt framework.
    pub fn framework(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: "framework".to_string(),
            name: None,
            path: Some(path.into()),
            public_headers: None,
            swift_module_map: None,
        }
    }

    /// A `library` reference to a prebuilt library.
    pub fn library(
        path: impl Into<PathBuf>,
        public_headers: impl Into<PathBuf>,
        swift_module_map: Option<PathBuf>,
    ) -> Self {
        Self {
            kind: "library".to_string(),
            name: None,
            path: Some(path.into()),
            public_headers: Some(public_headers.into()),
            swift_module_map,
        }
    }
}

/// One target as declared in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetManifest {
    /// Target name, unique within the manifest.
    pub name: String,
    /// What the target builds.
    pub product: Product,
    /// Declared dependency references, in order.
    #[serde(default)]
    pub dependencies: Vec<DependencyManifest>,
}

/// A parsed `Project.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project name.
    pub name: String,
    /// Declared targets.
    #[serde(default)]
    pub targets: Vec<TargetManifest>,
}

impl ProjectManifest {
    /// Parse a manifest from TOML text.
    pub fn parse(content: &str, path: &Path) -> Result<Self, GirderError> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| GirderError::ManifestParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        manifest.validate(path)?;
        Ok(manifest)
    }

    /// Validate internal consistency: target names must be unique.
    pub fn validate(&self, path: &Path) -> Result<(), GirderError> {
        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(target.name.as_str()) {
                return Err(GirderError::ManifestValidationError {
                    reason: format!(
                        "duplicate target '{}' in project at {}",
                        target.name,
                        path.display()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Capability to load a project description for a location.
///
/// The graph loader consults its project cache first, so implementations are
/// called at most once per distinct location within one build pass.
pub trait ManifestSource {
    /// Load the manifest describing the project at `path` (a directory).
    fn load(&self, path: &Path) -> Result<ProjectManifest, GirderError>;
}

/// Default [`ManifestSource`] reading `Project.toml` files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlManifestSource;

impl ManifestSource for TomlManifestSource {
    fn load(&self, path: &Path) -> Result<ProjectManifest, GirderError> {
        let file = path.join(MANIFEST_FILENAME);
        if !file.exists() {
            return Err(GirderError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(&file)?;
        ProjectManifest::parse(&content, &file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_MANIFEST: &str = r#"
name = "App"

[[targets]]
name = "App"
product = "app"
dependencies = [
    { type = "target", name = "Core" },
    { type = "library", path = "Vendor/libssl.a", public_headers = "Vendor/include" },
]

[[targets]]
name = "Core"
product = "static_library"
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = ProjectManifest::parse(APP_MANIFEST, Path::new("/p/Project.toml")).unwrap();
        assert_eq!(manifest.name, "App");
        assert_eq!(manifest.targets.len(), 2);

        let app = &manifest.targets[0];
        assert_eq!(app.product, Product::App);
        assert_eq!(app.dependencies[0], DependencyManifest::target("Core"));
        assert_eq!(
            app.dependencies[1],
            DependencyManifest::library("Vendor/libssl.a", "Vendor/include", None)
        );

        let core = &manifest.targets[1];
        assert_eq!(core.product, Product::StaticLibrary);
        assert!(core.dependencies.is_empty());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = ProjectManifest::parse("name = ", Path::new("/p/Project.toml")).unwrap_err();
        match err {
            GirderError::ManifestParseError { path, .. } => {
                assert_eq!(path, PathBuf::from("/p/Project.toml"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_survives_parsing() {
        // Unknown dependency kinds are a loader error, not a parse error.
        let manifest = ProjectManifest::parse(
            r#"
name = "App"

[[targets]]
name = "App"
product = "app"
dependencies = [{ type = "carthage", name = "Alamofire" }]
"#,
            Path::new("/p/Project.toml"),
        )
        .unwrap();
        assert_eq!(manifest.targets[0].dependencies[0].kind, "carthage");
    }

    #[test]
    fn test_duplicate_target_names_rejected() {
        let err = ProjectManifest::parse(
            r#"
name = "App"

[[targets]]
name = "Core"
product = "static_library"

[[targets]]
name = "Core"
product = "framework"
"#,
            Path::new("/p/Project.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, GirderError::ManifestValidationError { .. }));
    }

    #[test]
    fn test_toml_source_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = TomlManifestSource.load(dir.path()).unwrap_err();
        assert!(matches!(err, GirderError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_toml_source_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILENAME), APP_MANIFEST).unwrap();
        let manifest = TomlManifestSource.load(dir.path()).unwrap();
        assert_eq!(manifest.name, "App");
    }
}
