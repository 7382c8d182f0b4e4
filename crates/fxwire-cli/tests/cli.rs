use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

use fxwire_bridge::SymbolicType;
use fxwire_model::{AnnotationMirror, ClassSymbol, ConstructorSymbol, SymbolId};
use fxwire_types::ElementValue;

fn main_view_symbol(modifiers: &[&str]) -> ClassSymbol {
    ClassSymbol {
        id: SymbolId(1),
        qualified_name: "com.example.MainView".to_string(),
        kind: "CLASS".to_string(),
        modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
        annotations: vec![AnnotationMirror::new(SymbolicType::declared(
            "com.example.FxView",
        ))
        .with_element("name", ElementValue::String("main.fxml".into()))],
        constructors: vec![ConstructorSymbol {
            id: SymbolId(2),
            modifiers: vec!["PUBLIC".to_string()],
            annotations: vec![],
            params: vec![],
        }],
        fields: vec![],
        methods: vec![],
    }
}

fn write_dump(dir: &std::path::Path, classes: Vec<ClassSymbol>) -> std::path::PathBuf {
    let dump = json!({
        "classpath": ["com.example.FxView"],
        "classes": classes,
    });
    let path = dir.join("dump.json");
    std::fs::write(&path, serde_json::to_string_pretty(&dump).unwrap()).unwrap();
    path
}

#[test]
fn generate_writes_sources_under_the_output_root() {
    let dir = tempfile::tempdir().unwrap();
    let dump = write_dump(dir.path(), vec![main_view_symbol(&["PUBLIC"])]);
    let out = dir.path().join("out");

    Command::cargo_bin("fxwire")
        .unwrap()
        .args(["generate"])
        .arg(&dump)
        .arg("--out")
        .arg(&out)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.MainViewGenerated"));

    let generated = out
        .join("com")
        .join("example")
        .join("MainViewGenerated.java");
    let source = std::fs::read_to_string(generated).unwrap();
    assert!(source.contains("public class MainViewGenerated extends MainView {"));
    assert!(source.contains("getResource(\"main.fxml\")"));
}

#[test]
fn check_fails_on_an_unsubclassable_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let dump = write_dump(dir.path(), vec![main_view_symbol(&["PUBLIC", "FINAL"])]);

    Command::cargo_bin("fxwire")
        .unwrap()
        .args(["check"])
        .arg(&dump)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fxwire.invalid-candidate"));
}

#[test]
fn check_passes_on_a_clean_dump() {
    let dir = tempfile::tempdir().unwrap();
    let dump = write_dump(dir.path(), vec![main_view_symbol(&["PUBLIC"])]);

    Command::cargo_bin("fxwire")
        .unwrap()
        .args(["check"])
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 generated, 0 skipped"));
}

#[test]
fn rust_log_enables_debug_events_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let dump = write_dump(dir.path(), vec![main_view_symbol(&["PUBLIC"])]);

    Command::cargo_bin("fxwire")
        .unwrap()
        .env("RUST_LOG", "fxwire=debug")
        .args(["check"])
        .arg(&dump)
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded symbol dump"));
}

#[test]
fn malformed_dump_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.json");
    std::fs::write(&path, "{ not json").unwrap();

    Command::cargo_bin("fxwire")
        .unwrap()
        .args(["generate"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse symbol dump"));
}
