//! The `resolve` command: build a graph and show what was resolved.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::graph::{Dependency, GraphLoader, ValueGraph};

/// The project directory to resolve in: the given path made absolute against
/// the current working directory.
pub(crate) fn effective_project_dir(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Resolve the dependency graph rooted at a target and print a summary.
#[derive(Args)]
pub struct ResolveCommand {
    /// Name of the root target.
    #[arg(short, long)]
    target: String,

    /// Project directory containing the Project.toml (defaults to the
    /// current directory).
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Print the dependency tree instead of a summary.
    #[arg(long)]
    tree: bool,
}

impl ResolveCommand {
    /// Build the graph and print the requested view.
    pub fn execute(self) -> Result<()> {
        let dir = effective_project_dir(&self.path)?;
        let graph = GraphLoader::new().load_target(&self.target, &dir)?;

        if self.tree {
            let root = Dependency::target(&self.target, &graph.path);
            print!("{}", tree_string(&graph, &root));
        } else {
            println!(
                "{} target '{}' in project '{}'",
                "Resolved".green().bold(),
                self.target,
                graph.name
            );
            println!(
                "  {} project(s), {} node(s), {} dependency edge(s)",
                graph.projects.len(),
                graph.node_count(),
                graph.edge_count()
            );
        }
        Ok(())
    }
}

/// Render the dependency tree below `root`, marking re-visited nodes instead
/// of expanding them again.
pub fn tree_string(graph: &ValueGraph, root: &Dependency) -> String {
    let mut out = String::new();
    let mut visited = HashSet::new();
    let _ = writeln!(out, "{root}");
    let children = sorted_children(graph, root);
    visited.insert(root.clone());
    for (i, child) in children.iter().enumerate() {
        subtree(graph, child, &mut out, "", i + 1 == children.len(), &mut visited);
    }
    out
}

fn subtree(
    graph: &ValueGraph,
    node: &Dependency,
    out: &mut String,
    prefix: &str,
    is_last: bool,
    visited: &mut HashSet<Dependency>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    if !visited.insert(node.clone()) {
        let _ = writeln!(out, "{prefix}{connector}{node} (shared)");
        return;
    }
    let _ = writeln!(out, "{prefix}{connector}{node}");

    let children = sorted_children(graph, node);
    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    for (i, child) in children.iter().enumerate() {
        subtree(graph, child, out, &child_prefix, i + 1 == children.len(), visited);
    }
}

/// Children in a stable order for rendering; set iteration order is
/// unspecified and would make the tree jump between runs.
fn sorted_children(graph: &ValueGraph, node: &Dependency) -> Vec<Dependency> {
    let mut children: Vec<Dependency> =
        graph.dependencies.get(node).map(|set| set.iter().cloned().collect()).unwrap_or_default();
    children.sort_by_key(std::string::ToString::to_string);
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphLoader;
    use crate::manifest::DependencyManifest;
    use crate::project::Product;
    use crate::test_utils::{manifest, target, InMemoryManifestSource, StubFileChecker};
    use std::path::Path;

    #[test]
    fn test_tree_marks_shared_nodes() {
        let source = InMemoryManifestSource::new().with(
            "/p",
            manifest(
                "P",
                vec![
                    target(
                        "App",
                        Product::App,
                        vec![DependencyManifest::target("B"), DependencyManifest::target("C")],
                    ),
                    target("B", Product::Framework, vec![DependencyManifest::target("D")]),
                    target("C", Product::Framework, vec![DependencyManifest::target("D")]),
                    target("D", Product::StaticLibrary, vec![]),
                ],
            ),
        );
        let graph = GraphLoader::with_sources(source, StubFileChecker::new())
            .load_target("App", Path::new("/p"))
            .unwrap();

        let rendered = tree_string(&graph, &Dependency::target("App", "/p"));
        assert!(rendered.starts_with("target 'App' (/p)\n"));
        // D expands once and is marked shared on the second path.
        assert_eq!(rendered.matches("target 'D' (/p)").count(), 2);
        assert_eq!(rendered.matches("(shared)").count(), 1);
    }
}
