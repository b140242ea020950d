//! Command-line interface for girder.
//!
//! Each command is implemented as a separate module with its own argument
//! structure and execution logic:
//!
//! - `resolve` - Build the dependency graph rooted at a target and print a
//!   summary or an ASCII dependency tree
//! - `query` - Run one of the graph classification queries and print the
//!   results, one per line
//!
//! # Usage Patterns
//!
//! ```bash
//! # Resolve the graph for the project in the current directory
//! girder resolve --target App
//!
//! # Render the full dependency tree
//! girder resolve --target App --tree
//!
//! # What does the linker need, directly, for App?
//! girder query static --target App
//!
//! # Which bundles belong to App's product?
//! girder query bundles --target App --path ./projects/App
//! ```
//!
//! Logging goes through `tracing`: `--verbose` is equivalent to
//! `RUST_LOG=debug`, `--quiet` suppresses everything but errors, and an
//! explicit `RUST_LOG` always wins.

pub mod query;
pub mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// girder - resolve project dependency graphs from declarative manifests.
#[derive(Parser)]
#[command(name = "girder", version, about, propagate_version = true)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available subcommands for the girder CLI.
#[derive(Subcommand)]
enum Commands {
    /// Resolve the dependency graph rooted at a target.
    Resolve(resolve::ResolveCommand),

    /// Run a classification query over the resolved graph.
    Query(query::QueryCommand),
}

impl Cli {
    /// Initialize logging and execute the selected command.
    pub fn execute(self) -> Result<()> {
        self.init_logging();
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(),
            Commands::Query(cmd) => cmd.execute(),
        }
    }

    /// Set up the global tracing subscriber from the verbosity flags, letting
    /// an explicit RUST_LOG take precedence.
    fn init_logging(&self) {
        let default_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    }
}
