//! Cross-cutting utilities.
//!
//! Currently just the filesystem capability the graph loader uses to validate
//! that declared dependency artifacts exist on disk.

pub mod fs;

pub use fs::{normalize_path, FileChecker, StdFileChecker};
