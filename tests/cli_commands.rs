//! Integration test: the `tagtree` binary end to end.
//!
//! Each test runs in a temp workspace so the default `data.json` and
//! `tagtree.toml` lookups resolve inside it.

use serde_json::{json, Value};
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn workspace(graph: &Value) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("graph.json"), graph.to_string()).expect("failed to write graph");
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tagtree"))
        .args(args)
        .current_dir(dir.path())
        .output()
        .expect("failed to execute tagtree")
}

fn nested_graph() -> Value {
    json!({
        "nodes": {
            "note.md": { "type": "file", "links": { "#Proj|Api": true } },
            "#Proj|Api": { "type": "tag", "links": { "note.md": true } }
        }
    })
}

#[test]
fn expand_writes_rewritten_graph() {
    let dir = workspace(&nested_graph());
    let out = run(&dir, &["expand", "graph.json", "--output", "out.json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let written = fs::read_to_string(dir.path().join("out.json")).expect("no output file");
    let value: Value = serde_json::from_str(&written).expect("output is not JSON");
    let nodes = &value["nodes"];
    assert!(nodes.get("#Proj|Api").is_none());
    assert_eq!(nodes["note.md"]["links"], json!({ "Api": true }));
    assert_eq!(nodes["#Proj"]["color"], json!("#16a34a"));
}

#[test]
fn expand_root_override_and_no_colors() {
    let dir = workspace(&nested_graph());
    let out = run(
        &dir,
        &["expand", "graph.json", "--redirect", "root", "--no-colors", "-o", "out.json"],
    );
    assert!(out.status.success());

    let written = fs::read_to_string(dir.path().join("out.json")).expect("no output file");
    let value: Value = serde_json::from_str(&written).expect("output is not JSON");
    assert_eq!(value["nodes"]["note.md"]["links"], json!({ "#Proj": true }));
    assert!(value["nodes"]["#Proj"].get("color").is_none());
}

#[test]
fn invalid_document_exits_2() {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("graph.json"), "{ not json").expect("failed to write graph");
    let out = run(&dir, &["expand", "graph.json"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn check_passes_clean_graph() {
    let dir = workspace(&nested_graph());
    let out = run(&dir, &["check", "graph.json"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn check_flags_dangling_link() {
    let graph = json!({
        "nodes": { "a.md": { "type": "file", "links": { "ghost": true } } }
    });
    let dir = workspace(&graph);
    let out = run(&dir, &["check", "graph.json"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn settings_edits_are_persisted() {
    let dir = TempDir::new().expect("failed to create temp dir");
    assert!(run(&dir, &["settings", "add-rule"]).status.success());
    let out = run(
        &dir,
        &["settings", "set-rule", "0", "--name", "note", "--color", "#abcdef"],
    );
    assert!(out.status.success());
    assert!(run(&dir, &["settings", "toggle", "rules", "false"]).status.success());

    let saved = fs::read_to_string(dir.path().join("data.json")).expect("settings not saved");
    let value: Value = serde_json::from_str(&saved).expect("settings are not JSON");
    assert_eq!(value["customNodeColors"][0]["nodeName"], json!("note"));
    assert_eq!(value["customNodeColors"][0]["color"], json!("#abcdef"));
    assert_eq!(value["enableCustomNodeColors"], json!(false));
}

#[test]
fn removing_missing_rule_fails() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let out = run(&dir, &["settings", "remove-rule", "4"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("data.json").exists());
}

#[test]
fn expand_accepts_foreign_color_shapes() {
    let graph = json!({
        "nodes": {
            "note.md": {
                "type": "file",
                "links": { "#Proj|Api": true },
                "color": { "a": 1, "rgb": 255 }
            },
            "#Proj|Api": { "type": "tag", "links": { "note.md": true } }
        }
    });
    let dir = workspace(&graph);
    let out = run(&dir, &["expand", "graph.json", "-o", "out.json"]);
    assert_eq!(out.status.code(), Some(0));

    let written = fs::read_to_string(dir.path().join("out.json")).expect("no output file");
    let value: Value = serde_json::from_str(&written).expect("output is not JSON");
    assert_eq!(value["nodes"]["note.md"]["color"], json!("#2563eb"));
}
