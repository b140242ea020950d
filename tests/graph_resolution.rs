//! End-to-end graph resolution against real manifests on disk.

use girder::core::GirderError;
use girder::graph::{Dependency, GraphDependencyReference, GraphLoader, GraphTraverser};
use girder::project::Product;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a Project.toml into `dir`.
fn write_manifest(dir: &Path, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("Project.toml"), content).unwrap();
}

#[test]
fn test_end_to_end_application_project() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("App");
    write_manifest(
        &project,
        r#"
name = "App"

[[targets]]
name = "App"
product = "app"
dependencies = [
    { type = "target", name = "Lib" },
    { type = "library", path = "Vendor/libFoo.a", public_headers = "Vendor/include" },
]

[[targets]]
name = "Lib"
product = "static_library"

[[targets]]
name = "AppTests"
product = "unit_tests"
dependencies = [{ type = "target", name = "App" }]
"#,
    );
    fs::create_dir_all(project.join("Vendor/include")).unwrap();
    fs::write(project.join("Vendor/libFoo.a"), b"").unwrap();

    let graph = GraphLoader::new().load_target("App", &project).unwrap();
    assert_eq!(graph.name, "App");

    let traverser = GraphTraverser::new(&graph);
    let path = graph.path.as_path();

    // Direct target dependencies: just Lib (the library file is not a target).
    let direct = traverser.direct_target_dependencies(path, "App");
    assert_eq!(direct.len(), 1);
    assert!(direct.iter().any(|gt| gt.target.name == "Lib"));

    // The static linkable reference for Lib, decorated.
    assert_eq!(
        traverser.direct_static_dependencies(path, "App"),
        std::collections::HashSet::from([GraphDependencyReference::Product {
            target: "Lib".to_string(),
            product_name: "libLib.a".to_string(),
        }])
    );

    // No bundle-product target anywhere in the chain.
    assert!(traverser.resource_bundle_dependencies(path, "App").is_empty());

    // The library node exists as a leaf with its headers recorded.
    let library = Dependency::Library {
        path: project.join("Vendor/libFoo.a"),
        public_headers: project.join("Vendor/include"),
        swift_module_map: None,
    };
    assert!(graph.dependencies[&Dependency::target("App", path)].contains(&library));
    assert!(graph.dependencies[&library].is_empty());
}

#[test]
fn test_test_targets_found_after_loading_them() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("App");
    write_manifest(
        &project,
        r#"
name = "App"

[[targets]]
name = "App"
product = "app"

[[targets]]
name = "AppTests"
product = "unit_tests"
dependencies = [{ type = "target", name = "App" }]
"#,
    );

    // Load from the test target so both targets end up in the graph.
    let graph = GraphLoader::new().load_target("AppTests", &project).unwrap();
    let traverser = GraphTraverser::new(&graph);

    let tests = traverser.test_targets_depending_on(&graph.path, "App");
    assert_eq!(tests.len(), 1);
    assert!(tests.iter().any(|gt| gt.target.name == "AppTests"));
}

#[test]
fn test_cross_project_resolution_and_closure() {
    let tmp = TempDir::new().unwrap();
    let app = tmp.path().join("apps/App");
    let design = tmp.path().join("apps/Design");
    write_manifest(
        &app,
        r#"
name = "App"

[[targets]]
name = "App"
product = "app"
dependencies = [{ type = "project", name = "DesignSystem", path = "../Design" }]
"#,
    );
    write_manifest(
        &design,
        r#"
name = "Design"

[[targets]]
name = "DesignSystem"
product = "framework"
"#,
    );

    let graph = GraphLoader::new().load_target("App", &app).unwrap();
    assert_eq!(graph.projects.len(), 2);

    let traverser = GraphTraverser::new(&graph);
    let direct = traverser.direct_target_dependencies(&graph.path, "App");
    assert_eq!(direct.len(), 1);
    let dep = direct.into_iter().next().unwrap();
    assert_eq!(dep.target.name, "DesignSystem");
    // The dependency target is paired with its own project.
    assert_eq!(dep.project.name, "Design");

    let all = traverser.all_dependencies(&graph.path);
    assert!(all.iter().any(
        |d| matches!(d, Dependency::Target { name, .. } if name == "DesignSystem")
    ));
}

#[test]
fn test_missing_framework_file_aborts_resolution() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("App");
    write_manifest(
        &project,
        r#"
name = "App"

[[targets]]
name = "App"
product = "app"
dependencies = [{ type = "framework", path = "Vendor/Gone.framework" }]
"#,
    );

    let err = GraphLoader::new().load_target("App", &project).unwrap_err();
    match err {
        GirderError::MissingFile { path } => {
            assert!(path.ends_with("Vendor/Gone.framework"));
        }
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_cycle_on_disk_is_rejected_not_hung() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("App");
    write_manifest(
        &project,
        r#"
name = "App"

[[targets]]
name = "A"
product = "framework"
dependencies = [{ type = "target", name = "B" }]

[[targets]]
name = "B"
product = "framework"
dependencies = [{ type = "target", name = "A" }]
"#,
    );

    let err = GraphLoader::new().load_target("A", &project).unwrap_err();
    assert!(matches!(err, GirderError::CyclicDependency { cycle } if cycle == "A -> B -> A"));
}

#[test]
fn test_resource_bundle_boundary_on_disk() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("App");
    write_manifest(
        &project,
        r#"
name = "App"

[[targets]]
name = "R"
product = "app"
dependencies = [{ type = "target", name = "M" }]

[[targets]]
name = "M"
product = "bundle"
dependencies = [{ type = "target", name = "S" }]

[[targets]]
name = "S"
product = "framework"
dependencies = [{ type = "target", name = "N" }]

[[targets]]
name = "N"
product = "bundle"
"#,
    );

    let graph = GraphLoader::new().load_target("R", &project).unwrap();
    let traverser = GraphTraverser::new(&graph);

    let from_r: Vec<String> = traverser
        .resource_bundle_dependencies(&graph.path, "R")
        .into_iter()
        .map(|gt| gt.target.name)
        .collect();
    assert_eq!(from_r, vec!["M".to_string()]);

    let from_s: Vec<String> = traverser
        .resource_bundle_dependencies(&graph.path, "S")
        .into_iter()
        .map(|gt| gt.target.name)
        .collect();
    assert_eq!(from_s, vec!["N".to_string()]);
}

#[test]
fn test_queries_against_absent_locations_never_fail() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("App");
    write_manifest(
        &project,
        r#"
name = "App"

[[targets]]
name = "App"
product = "app"
"#,
    );

    let graph = GraphLoader::new().load_target("App", &project).unwrap();
    let traverser = GraphTraverser::new(&graph);
    let elsewhere = tmp.path().join("nope");

    assert!(traverser.direct_target_dependencies(&elsewhere, "App").is_empty());
    assert!(traverser.all_dependencies(&elsewhere).is_empty());
    assert!(traverser.resource_bundle_dependencies(&graph.path, "Ghost").is_empty());
}
