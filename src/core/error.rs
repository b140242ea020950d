//! Error handling for girder.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`GirderError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Manifests**: [`GirderError::ManifestNotFound`], [`GirderError::ManifestParseError`],
//!   [`GirderError::ManifestValidationError`]
//! - **Graph resolution**: [`GirderError::TargetNotFound`], [`GirderError::MissingFile`],
//!   [`GirderError::UnknownDependencyKind`], [`GirderError::CyclicDependency`]
//! - **I/O**: [`GirderError::Io`], converted automatically from [`std::io::Error`]
//!
//! Every resolution error is fatal to the graph build that raised it: the loader
//! propagates it with `?` and never produces a partially valid graph. Query-time
//! absence is *not* an error anywhere in girder; queries return empty results.
//!
//! # Examples
//!
//! ```rust,no_run
//! use girder::core::{user_friendly_error, GirderError};
//!
//! fn resolve() -> Result<(), GirderError> {
//!     Err(GirderError::ManifestNotFound { path: "/tmp/App".into() })
//! }
//!
//! if let Err(e) = resolve() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // Colored message plus a suggestion
//! }
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for girder operations.
///
/// Each variant carries enough context (manifest location, missing file path,
/// cycle description) for the operator to fix the offending manifest rather
/// than receiving an opaque internal fault.
#[derive(Error, Debug)]
pub enum GirderError {
    /// No manifest file exists at the given project location.
    #[error("Manifest file Project.toml not found at {}", path.display())]
    ManifestNotFound {
        /// Directory that was expected to contain a Project.toml
        path: PathBuf,
    },

    /// The manifest file exists but is not valid TOML / does not match the schema.
    #[error("Invalid manifest file syntax in {}: {reason}", path.display())]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        path: PathBuf,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// The manifest parsed but its content is inconsistent.
    #[error("Manifest validation failed: {reason}")]
    ManifestValidationError {
        /// Reason why manifest validation failed
        reason: String,
    },

    /// The manifest at `path` does not declare a target with the requested name.
    #[error("Target '{name}' not found in project at {}", path.display())]
    TargetNotFound {
        /// Name of the target that could not be found
        name: String,
        /// Location of the project that was searched
        path: PathBuf,
    },

    /// A declared dependency artifact, headers directory, or module map is
    /// absent from disk. The node is never constructed nor cached.
    #[error("Dependency file not found at {}", path.display())]
    MissingFile {
        /// Path that was declared in a manifest but does not exist
        path: PathBuf,
    },

    /// A manifest declares a dependency `type` the resolver does not
    /// understand. This is a configuration defect, not a recoverable state.
    #[error("Unknown dependency type '{kind}' declared in project at {}", path.display())]
    UnknownDependencyKind {
        /// The unrecognized dependency kind string
        kind: String,
        /// Location of the project declaring it
        path: PathBuf,
    },

    /// A target transitively depends on itself.
    #[error("Circular dependency detected: {cycle}")]
    CyclicDependency {
        /// Human-readable cycle path, e.g. `App -> Core -> App`
        cycle: String,
    },

    /// IO error wrapper from [`std::io::Error`].
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// User-friendly error wrapper that pairs an error with a suggestion and
/// optional details for terminal display.
///
/// # Examples
///
/// ```rust,no_run
/// use girder::core::ErrorContext;
///
/// let ctx = ErrorContext::new(anyhow::anyhow!("something failed"))
///     .with_suggestion("Check the manifest for typos");
/// ctx.display();
/// ```
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// Actionable suggestion shown to the user, if any
    pub suggestion: Option<String>,
    /// Extra detail lines shown below the message, if any
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details attached.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach an actionable suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach extra detail text.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);
        if let Some(details) = &self.details {
            eprintln!("  {details}");
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("{} {}", "Hint:".yellow().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n  {details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nHint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion matched to
/// the failure category.
///
/// Unrecognized errors pass through with no suggestion attached.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<GirderError>() {
        Some(GirderError::ManifestNotFound { .. }) => {
            Some("Create a Project.toml in the project directory")
        }
        Some(GirderError::ManifestParseError { .. }) => {
            Some("Check the manifest for TOML syntax errors")
        }
        Some(GirderError::ManifestValidationError { .. }) => {
            Some("Fix the inconsistency reported above and re-run")
        }
        Some(GirderError::TargetNotFound { .. }) => {
            Some("Check the target name against the [[targets]] entries in the manifest")
        }
        Some(GirderError::MissingFile { .. }) => {
            Some("Ensure the declared file exists, or correct its relative path in the manifest")
        }
        Some(GirderError::UnknownDependencyKind { .. }) => {
            Some("Valid dependency types are: target, project, framework, library")
        }
        Some(GirderError::CyclicDependency { .. }) => {
            Some("Break the cycle by removing one of the target dependencies listed above")
        }
        _ => None,
    };

    let ctx = ErrorContext::new(error);
    match suggestion {
        Some(s) => ctx.with_suggestion(s),
        None => ctx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_path() {
        let err = GirderError::TargetNotFound {
            name: "App".to_string(),
            path: PathBuf::from("/projects/App"),
        };
        assert_eq!(err.to_string(), "Target 'App' not found in project at /projects/App");

        let err = GirderError::MissingFile {
            path: PathBuf::from("/projects/App/libFoo.a"),
        };
        assert!(err.to_string().contains("/projects/App/libFoo.a"));
    }

    #[test]
    fn test_cycle_error_carries_cycle_path() {
        let err = GirderError::CyclicDependency {
            cycle: "App -> Core -> App".to_string(),
        };
        assert_eq!(err.to_string(), "Circular dependency detected: App -> Core -> App");
    }

    #[test]
    fn test_user_friendly_error_attaches_suggestion() {
        let err = GirderError::UnknownDependencyKind {
            kind: "carthage".to_string(),
            path: PathBuf::from("/projects/App"),
        };
        let ctx = user_friendly_error(anyhow::Error::from(err));
        assert!(ctx.suggestion.unwrap().contains("target, project, framework, library"));
    }

    #[test]
    fn test_context_display_includes_details_and_hint() {
        let ctx = ErrorContext::new(anyhow::anyhow!("boom"))
            .with_details("while resolving /projects/App")
            .with_suggestion("try again");
        let rendered = format!("{ctx}");
        assert!(rendered.contains("boom"));
        assert!(rendered.contains("while resolving /projects/App"));
        assert!(rendered.contains("Hint: try again"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: GirderError = io.into();
        assert!(matches!(err, GirderError::Io(_)));
    }
}
