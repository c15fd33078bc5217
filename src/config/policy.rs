// src/config/policy.rs
//! Expansion policy from tagtree.toml.

use serde::{Deserialize, Serialize};

/// Where file connections of a compound tag end up after expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RedirectTarget {
    /// Deepest segment. Keeps the full hierarchy visible.
    #[default]
    Leaf,
    /// First segment. Files cluster around their top-level tag.
    Root,
}

/// How a child segment that appears under several roots is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SharedSegments {
    /// One node per segment name, metadata unioned across paths.
    #[default]
    Merge,
    /// One node per (root, segment) pair.
    PerRoot,
}

/// Expansion rules from the `[expansion]` table of tagtree.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionPolicy {
    /// Separator between hierarchy levels. Default: '|'
    pub separator: char,
    /// Hierarchy marker stripped for display. Default: "#"
    pub marker: String,
    /// Redirection target for file links. Default: leaf
    pub redirect: RedirectTarget,
    /// Shared child segment handling. Default: merge
    pub shared_segments: SharedSegments,
    /// Extension ignored when matching node names against color rules.
    pub file_extension: String,
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        Self {
            separator: '|',
            marker: "#".to_string(),
            redirect: RedirectTarget::Leaf,
            shared_segments: SharedSegments::Merge,
            file_extension: ".md".to_string(),
        }
    }
}

impl ExpansionPolicy {
    /// Picks the redirect target out of a materialized chain.
    #[must_use]
    pub fn target_of<'a>(&self, chain: &'a [String]) -> Option<&'a String> {
        match self.redirect {
            RedirectTarget::Leaf => chain.last(),
            RedirectTarget::Root => chain.first(),
        }
    }
}

/// On-disk layout of tagtree.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagTreeToml {
    #[serde(default)]
    pub expansion: ExpansionPolicy,
}
