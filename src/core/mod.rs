//! Core types and functionality for girder.
//!
//! This module is the foundation of girder's type system: the error taxonomy
//! shared by every other module and the user-facing error presentation used
//! by the CLI.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`GirderError`] - Enumerated error types covering all girder failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Design Principles
//!
//! Every fallible operation returns a [`Result`] carrying a [`GirderError`];
//! graph construction errors abort the whole build pass rather than producing
//! a partially valid graph. "Not found" during *querying* is deliberately not
//! an error (see [`crate::graph::GraphTraverser`]).

pub mod error;

pub use error::{user_friendly_error, ErrorContext, GirderError};

/// Convenient result alias used throughout the crate.
pub type Result<T, E = GirderError> = std::result::Result<T, E>;
