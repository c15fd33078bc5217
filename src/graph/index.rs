// src/graph/index.rs
//! Cross-reference index over child segments.
//!
//! Built once, before any compound node is rewritten, so that shared child
//! segments see every path they appear in.

use std::collections::{BTreeMap, BTreeSet};

use super::segments::CompoundId;
use super::types::GraphDocument;

#[derive(Debug, Default)]
pub struct CrossRefIndex {
    /// Child segment identity -> compound ids containing it.
    compounds_by_segment: BTreeMap<String, BTreeSet<String>>,
    /// Compound id -> file ids connected to it in either direction.
    files_by_compound: BTreeMap<String, BTreeSet<String>>,
}

impl CrossRefIndex {
    #[must_use]
    pub fn build(doc: &GraphDocument, compounds: &[CompoundId]) -> Self {
        let mut index = Self::default();

        for compound in compounds {
            for segment in compound.chain.iter().skip(1) {
                index
                    .compounds_by_segment
                    .entry(segment.clone())
                    .or_default()
                    .insert(compound.raw.clone());
            }
            index
                .files_by_compound
                .insert(compound.raw.clone(), connected_files(doc, &compound.raw));
        }

        index
    }

    /// Compound ids that contain `segment` below the root.
    #[must_use]
    pub fn compounds_for(&self, segment: &str) -> BTreeSet<String> {
        self.compounds_by_segment
            .get(segment)
            .cloned()
            .unwrap_or_default()
    }

    /// Union of files connected to any compound containing `segment`.
    #[must_use]
    pub fn files_for(&self, segment: &str) -> BTreeSet<String> {
        let Some(compounds) = self.compounds_by_segment.get(segment) else {
            return BTreeSet::new();
        };
        compounds
            .iter()
            .filter_map(|c| self.files_by_compound.get(c))
            .flatten()
            .cloned()
            .collect()
    }
}

fn connected_files(doc: &GraphDocument, compound: &str) -> BTreeSet<String> {
    let inbound = doc
        .nodes
        .iter()
        .filter(|(_, node)| node.is_file() && node.links.contains_key(compound))
        .map(|(id, _)| id.clone());

    let outbound = doc
        .get(compound)
        .into_iter()
        .flat_map(|node| node.links.keys())
        .filter(|id| doc.get(id).is_some_and(super::types::NodeRecord::is_file))
        .cloned();

    inbound.chain(outbound).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpansionPolicy;
    use crate::graph::segments::Segmenter;
    use crate::graph::types::NodeRecord;
    use serde_json::json;

    #[test]
    fn test_shared_segment_unions_files() {
        let doc = GraphDocument::new()
            .with_node("a.md", NodeRecord::file().with_link("#A|X", json!(true)))
            .with_node("b.md", NodeRecord::file().with_link("#B|X", json!(true)))
            .with_node("#A|X", NodeRecord::tag().with_link("a.md", json!(true)))
            .with_node("#B|X", NodeRecord::tag().with_link("b.md", json!(true)));
        let s = Segmenter::new(&ExpansionPolicy::default());
        let compounds = vec![s.parse("#A|X").unwrap(), s.parse("#B|X").unwrap()];

        let index = CrossRefIndex::build(&doc, &compounds);

        let files: Vec<_> = index.files_for("X").into_iter().collect();
        assert_eq!(files, vec!["a.md", "b.md"]);
        assert_eq!(index.compounds_for("X").len(), 2);
        assert!(index.files_for("#A").is_empty(), "roots are not indexed");
    }
}
