// CLI tests for docgraph

use assert_cmd::Command;
use docgraph::Documentation;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn fixtures_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn docgraph() -> Command {
    Command::cargo_bin("docgraph").unwrap()
}

#[test]
fn test_generate_writes_documentation() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out").join("docs.json");

    docgraph()
        .arg("generate")
        .arg(fixtures_path("library.json"))
        .arg("--output")
        .arg(&output)
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 entry units"))
        .stdout(predicate::str::contains("Documentation written to"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(!contents.contains('\n'));
    let doc: Documentation = serde_json::from_str(&contents).unwrap();
    assert_eq!(doc.metadata.generator, "docgraph");
    assert_eq!(doc.pages[0].id, "index");
}

#[test]
fn test_generate_with_config_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("docs.json");
    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        r#"
[project]
name = "My Library"
package_name = "lib"

[generator]
document_globals = false
include_ambient_modules = false
"#
    )
    .unwrap();

    docgraph()
        .arg("generate")
        .arg(fixtures_path("library.json"))
        .arg("--config")
        .arg(config.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let doc: Documentation =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc.pages[0].name, "My Library");
    let ids: Vec<_> = doc.pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["index", "lib", "lib-Thing", "lib-Summable", "lib-shapes"]);
}

#[test]
fn test_generate_entry_pattern() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("docs.json");

    docgraph()
        .arg("generate")
        .arg(fixtures_path("circular.json"))
        .args(["--entry", "/proj/a.*"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 entry units"));
}

#[test]
fn test_generate_debug_prints_stats() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("docs.json");

    docgraph()
        .arg("generate")
        .arg(fixtures_path("circular.json"))
        .arg("-o")
        .arg(&output)
        .arg("--debug")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passes\": 2"));
}

#[test]
fn test_generate_unknown_entry() {
    let dir = TempDir::new().unwrap();

    docgraph()
        .arg("generate")
        .arg(fixtures_path("circular.json"))
        .args(["--entry", "/elsewhere/*.ts"])
        .arg("-o")
        .arg(dir.path().join("docs.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entry unit: /elsewhere/*.ts"));
}

#[test]
fn test_generate_missing_snapshot() {
    docgraph()
        .args(["generate", "/nonexistent/program.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_generate_invalid_snapshot() {
    let mut snapshot = NamedTempFile::new().unwrap();
    writeln!(snapshot, r#"{{ "globals": ["missing"] }}"#).unwrap();

    docgraph()
        .arg("generate")
        .arg(snapshot.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid program snapshot"));
}

#[test]
fn test_version() {
    docgraph()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("docgraph "));
}
