//! The `query` command: run one classification query and print the results.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::cli::resolve::effective_project_dir;
use crate::graph::{GraphLoader, GraphTarget, GraphTraverser};

/// Which classification query to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryKind {
    /// Direct target dependencies.
    Direct,
    /// Resource bundles belonging to the target's product.
    Bundles,
    /// Test targets depending on the target.
    Tests,
    /// Direct app/watch/messages/sticker-pack extension dependencies.
    Extensions,
    /// The app-clip dependency, if any.
    Clip,
    /// Direct statically linked dependencies (linkable references).
    Static,
    /// The transitive closure of every target in the project.
    All,
}

/// Run a classification query over the resolved graph.
#[derive(Args)]
pub struct QueryCommand {
    /// The query to run.
    #[arg(value_enum)]
    kind: QueryKind,

    /// Name of the target to query about (ignored for `all`).
    #[arg(short, long)]
    target: String,

    /// Project directory containing the Project.toml (defaults to the
    /// current directory).
    #[arg(short, long, default_value = ".")]
    path: PathBuf,
}

impl QueryCommand {
    /// Resolve the graph, run the query, print one result per line.
    pub fn execute(self) -> Result<()> {
        let dir = effective_project_dir(&self.path)?;
        let graph = GraphLoader::new().load_target(&self.target, &dir)?;
        let traverser = GraphTraverser::new(&graph);
        let path = graph.path.clone();

        let mut lines: Vec<String> = match self.kind {
            QueryKind::Direct => {
                target_lines(traverser.direct_target_dependencies(&path, &self.target))
            }
            QueryKind::Bundles => {
                target_lines(traverser.resource_bundle_dependencies(&path, &self.target))
            }
            QueryKind::Tests => {
                target_lines(traverser.test_targets_depending_on(&path, &self.target))
            }
            QueryKind::Extensions => {
                target_lines(traverser.app_extension_dependencies(&path, &self.target))
            }
            QueryKind::Clip => traverser
                .app_clips_dependency(&path, &self.target)
                .map(|gt| target_line(&gt))
                .into_iter()
                .collect(),
            QueryKind::Static => traverser
                .direct_static_dependencies(&path, &self.target)
                .into_iter()
                .map(|reference| reference.to_string())
                .collect(),
            QueryKind::All => traverser
                .all_dependencies(&path)
                .into_iter()
                .map(|dependency| dependency.to_string())
                .collect(),
        };

        lines.sort();
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}

fn target_line(gt: &GraphTarget) -> String {
    format!("{} ({}) in {}", gt.target.name, gt.target.product, gt.project.name)
}

fn target_lines(set: impl IntoIterator<Item = GraphTarget>) -> Vec<String> {
    set.into_iter().map(|gt| target_line(&gt)).collect()
}
