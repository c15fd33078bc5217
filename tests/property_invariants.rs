// tests/property_invariants.rs
//! Structural properties over generated nested-tag documents.

use proptest::prelude::*;
use serde_json::json;
use tagtree_core::color::hex;
use tagtree_core::config::{ExpansionPolicy, RedirectTarget};
use tagtree_core::graph::{check_invariants, GraphDocument, HierarchyExpander, NodeRecord};
use tagtree_core::pipeline::Pipeline;

fn tag_id() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["#A", "#B", "#C"]),
        prop::sample::subsequence(vec!["X", "Y", "Z", "1", "2"], 0..=3),
    )
        .prop_map(|(root, kids)| {
            std::iter::once(root)
                .chain(kids)
                .collect::<Vec<_>>()
                .join("|")
        })
}

fn document() -> impl Strategy<Value = GraphDocument> {
    prop::collection::vec(prop::collection::vec(tag_id(), 1..4), 1..6).prop_map(|files| {
        let mut doc = GraphDocument::new();
        for (i, tags) in files.iter().enumerate() {
            let file = format!("f{i}.md");
            doc.nodes.entry(file.clone()).or_insert_with(NodeRecord::file);
            for tag in tags {
                doc.nodes.entry(tag.clone()).or_insert_with(NodeRecord::tag);
                doc.link(&file, tag, json!(true));
            }
        }
        doc
    })
}

fn expander(root: bool) -> HierarchyExpander {
    let redirect = if root {
        RedirectTarget::Root
    } else {
        RedirectTarget::Leaf
    };
    HierarchyExpander::new(ExpansionPolicy {
        redirect,
        ..ExpansionPolicy::default()
    })
}

proptest! {
    #[test]
    fn expansion_is_idempotent(mut doc in document(), root in any::<bool>()) {
        let e = expander(root);
        e.expand(&mut doc);
        let once = doc.clone();
        e.expand(&mut doc);
        prop_assert_eq!(doc, once);
    }

    #[test]
    fn expanded_graph_is_consistent(mut doc in document(), root in any::<bool>()) {
        let report = expander(root).expand(&mut doc);
        prop_assert!(report.is_clean());
        let invariants = check_invariants(&doc, '|');
        prop_assert!(invariants.is_clean(), "{:?}", invariants.violations);
    }

    #[test]
    fn file_count_is_preserved(mut doc in document()) {
        let files_before = doc.nodes.values().filter(|n| n.is_file()).count();
        expander(false).expand(&mut doc);
        let files_after = doc.nodes.values().filter(|n| n.is_file()).count();
        prop_assert_eq!(files_before, files_after);
    }

    #[test]
    fn every_node_gets_valid_colors(mut doc in document()) {
        Pipeline::default().rewrite(&mut doc);
        for (id, node) in &doc.nodes {
            prop_assert!(node.color.as_deref().is_some_and(hex::is_valid), "{} fill", id);
            prop_assert!(node.stroke_color.as_deref().is_some_and(hex::is_valid), "{} stroke", id);
        }
    }
}
