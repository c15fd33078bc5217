// tests/integration_expand.rs
//! Full-pipeline scenarios on host-shaped JSON documents.

use serde_json::{json, Value};
use tagtree_core::color::{hex, ColorRules, NodeColorRule};
use tagtree_core::graph::{check_invariants, GraphDocument, HierarchyExpander};
use tagtree_core::pipeline::Pipeline;

fn doc(value: Value) -> GraphDocument {
    GraphDocument::from_json(&value.to_string()).unwrap()
}

fn links(doc: &GraphDocument, id: &str) -> Vec<String> {
    doc.get(id)
        .map(|n| n.links.keys().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn test_file_moves_to_leaf() {
    let mut d = doc(json!({"nodes": {
        "F": {"type": "file", "links": {"#Root|Mid|Leaf": true}},
        "#Root|Mid|Leaf": {"type": "tag", "links": {"F": true}}
    }}));

    HierarchyExpander::default().expand(&mut d);

    assert_eq!(links(&d, "F"), vec!["Leaf"]);
    assert_eq!(links(&d, "#Root"), vec!["Mid"]);
    assert_eq!(links(&d, "Mid"), vec!["#Root", "Leaf"]);
    assert_eq!(links(&d, "Leaf"), vec!["F", "Mid"]);
    assert!(!d.contains("#Root|Mid|Leaf"));
    assert!(check_invariants(&d, '|').is_clean());
}

#[test]
fn test_shared_segment_union() {
    let mut d = doc(json!({"nodes": {
        "a.md": {"type": "file", "links": {"#A|X": true}},
        "b.md": {"type": "file", "links": {"#B|X": true}},
        "#A|X": {"type": "tag", "links": {"a.md": true}},
        "#B|X": {"type": "tag", "links": {"b.md": true}}
    }}));

    HierarchyExpander::default().expand(&mut d);

    let out: Value = serde_json::from_str(&d.to_json_pretty().unwrap()).unwrap();
    assert_eq!(out["nodes"]["X"]["relatedFiles"], json!(["a.md", "b.md"]));
    assert_eq!(out["nodes"]["X"]["aliases"], json!(["#A|X", "#B|X"]));
    assert_eq!(links(&d, "X"), vec!["#A", "#B", "a.md", "b.md"]);
}

#[test]
fn test_plain_tag_display_projection() {
    let mut d = doc(json!({"nodes": {
        "n.md": {"type": "file", "links": {"#Solo": true}},
        "#Solo": {"type": "tag", "links": {"n.md": true}, "title": "#Solo"}
    }}));

    HierarchyExpander::default().expand(&mut d);

    let out: Value = serde_json::from_str(&d.to_json_pretty().unwrap()).unwrap();
    let solo = &out["nodes"]["#Solo"];
    for field in ["displayName", "displayText", "name", "path", "title", "label", "text"] {
        assert_eq!(solo[field], json!("Solo"), "{field}");
    }
    assert_eq!(solo["links"], json!({"n.md": true}));
}

#[test]
fn test_custom_rule_and_stroke() {
    let mut d = doc(json!({"nodes": {
        "F": {"type": "file", "links": {"#Root|Leaf": true}},
        "#Root|Leaf": {"type": "tag", "links": {"F": true}}
    }}));
    let mut rules = ColorRules::default();
    rules.per_node_rules.push(NodeColorRule {
        match_name: "F".into(),
        color: "#112233".into(),
        enabled: true,
    });
    let pipeline = Pipeline::new(HierarchyExpander::default(), rules);

    assert!(pipeline.rewrite(&mut d).is_rewritten());

    let f = d.get("F").unwrap();
    assert_eq!(f.color.as_deref(), Some("#112233"));
    assert_eq!(f.stroke_color.as_deref(), Some("#000415"));
    for node in d.nodes.values() {
        assert!(hex::is_valid(node.color.as_deref().unwrap()));
        assert!(hex::is_valid(node.stroke_color.as_deref().unwrap()));
    }
}

#[test]
fn test_empty_segment_skipped_others_expand() {
    let original = json!({"type": "tag", "links": {"a.md": true}});
    let mut d = doc(json!({"nodes": {
        "a.md": {"type": "file", "links": {"#A||B": true}},
        "#A||B": original.clone(),
        "c.md": {"type": "file", "links": {"#C|D": true}},
        "#C|D": {"type": "tag", "links": {"c.md": true}}
    }}));

    let report = HierarchyExpander::default().expand(&mut d);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, "#A||B");
    let out: Value = serde_json::from_str(&d.to_json_pretty().unwrap()).unwrap();
    assert_eq!(out["nodes"]["#A||B"], original);
    assert!(!d.contains(""));
    assert!(!d.contains("B"));
    assert_eq!(links(&d, "c.md"), vec!["D"]);
}

#[test]
fn test_unknown_node_types_untouched() {
    let mut d = doc(json!({"nodes": {
        "img.png": {"type": "attachment", "links": {}, "size": 10},
        "#A|B": {"type": "tag", "links": {}}
    }}));

    HierarchyExpander::default().expand(&mut d);

    let out: Value = serde_json::from_str(&d.to_json_pretty().unwrap()).unwrap();
    assert_eq!(
        out["nodes"]["img.png"],
        json!({"type": "attachment", "links": {}, "size": 10})
    );
}

#[test]
fn test_odd_node_fields_do_not_block_rewrite() {
    let mut d = doc(json!({"nodes": {
        "F": {
            "type": "file",
            "links": {"#Root|Leaf": true},
            "color": {"a": 1, "rgb": 255},
            "role": "attachment"
        },
        "#Root|Leaf": {"type": "tag", "links": {"F": true}}
    }}));

    assert!(Pipeline::default().rewrite(&mut d).is_rewritten());

    let out: Value = serde_json::from_str(&d.to_json_pretty().unwrap()).unwrap();
    let f = &out["nodes"]["F"];
    assert_eq!(f["color"], json!("#2563eb"));
    assert_eq!(f["role"], json!("file"));
    assert_eq!(f["links"], json!({"Leaf": true}));
}
