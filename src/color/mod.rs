// src/color/mod.rs
//! Display color resolution for expanded graphs.
//!
//! Runs after expansion: the palette is keyed by role and level, which only
//! exist once the hierarchy has been materialized.

pub mod hex;
pub mod matcher;

pub use hex::{DEFAULT_COLOR, STROKE_DELTA};

use serde::{Deserialize, Serialize};

use crate::graph::{strip_marker, GraphDocument, NodeRecord, Role};
use matcher::Candidate;

/// Ids that always take the matching child-level palette entry.
pub const DEPTH_MARKERS: [&str; 3] = ["1", "2", "3"];

/// One user-defined rule. First enabled match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColorRule {
    pub match_name: String,
    pub color: String,
    pub enabled: bool,
}

/// Fallback palette keyed by role and level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleColors {
    pub root_tag: String,
    /// Index 0 is level 1. Deeper levels reuse the last entry.
    pub child_levels: Vec<String>,
    pub file: String,
}

impl RoleColors {
    /// Palette entry for a child at `level` (1-based).
    #[must_use]
    pub fn child_level(&self, level: usize) -> Option<&str> {
        let idx = level.saturating_sub(1);
        self.child_levels
            .get(idx)
            .or_else(|| self.child_levels.last())
            .map(String::as_str)
    }
}

/// Fully resolved color configuration handed to [`resolve_colors`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRules {
    pub enabled: bool,
    pub per_node_enabled: bool,
    pub per_node_rules: Vec<NodeColorRule>,
    pub role_colors: RoleColors,
    /// Hierarchy marker, stripped before the depth-marker check.
    pub marker: String,
    /// Extension ignored by name matching.
    pub file_extension: String,
}

impl Default for ColorRules {
    fn default() -> Self {
        crate::config::Settings::default().to_color_rules(&crate::config::ExpansionPolicy::default())
    }
}

/// Assigns `color` and `stroke_color` to every node.
///
/// A no-op when `rules.enabled` is false. Invalid colors anywhere in the
/// rules degrade to [`DEFAULT_COLOR`].
pub fn resolve_colors(doc: &mut GraphDocument, rules: &ColorRules) {
    if !rules.enabled {
        return;
    }
    for (id, node) in &mut doc.nodes {
        let fill = hex::sanitize(pick_color(id, node, rules));
        node.stroke_color = Some(hex::stroke_of(&fill));
        node.color = Some(fill);
    }
}

/// Raw (unvalidated) color for one node, by precedence.
#[must_use]
pub fn pick_color<'a>(id: &str, node: &NodeRecord, rules: &'a ColorRules) -> Option<&'a str> {
    if rules.per_node_enabled {
        let candidate = Candidate {
            id,
            display_name: node.display_name.as_deref(),
        };
        let hit = rules
            .per_node_rules
            .iter()
            .filter(|r| r.enabled)
            .find(|r| matcher::matches(&r.match_name, candidate, &rules.file_extension));
        if let Some(rule) = hit {
            return Some(rule.color.as_str());
        }
    }

    let bare = strip_marker(id, &rules.marker);
    if let Some(pos) = DEPTH_MARKERS.iter().position(|m| *m == bare) {
        return rules.role_colors.child_level(pos + 1);
    }

    match node.role {
        Some(Role::RootTag) => Some(rules.role_colors.root_tag.as_str()),
        Some(Role::ChildNode) => rules.role_colors.child_level(node.level.unwrap_or(1)),
        _ => Some(rules.role_colors.file.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(level: usize) -> NodeRecord {
        let mut n = NodeRecord::tag();
        n.role = Some(Role::ChildNode);
        n.level = Some(level);
        n
    }

    #[test]
    fn test_levels_beyond_palette_use_deepest() {
        let rules = ColorRules::default();
        assert_eq!(pick_color("deep", &child(7), &rules), Some("#dc2626"));
        assert_eq!(pick_color("mid", &child(1), &rules), Some("#fb923c"));
    }

    #[test]
    fn test_depth_marker_overrides_role() {
        let rules = ColorRules::default();
        let mut root = NodeRecord::tag();
        root.role = Some(Role::RootTag);
        assert_eq!(pick_color("2", &root, &rules), Some("#ea580c"));
        assert_eq!(pick_color("#3", &child(1), &rules), Some("#dc2626"));
    }

    #[test]
    fn test_disabled_rules_skipped_in_order() {
        let mut rules = ColorRules::default();
        rules.per_node_rules = vec![
            NodeColorRule {
                match_name: "F".into(),
                color: "#000001".into(),
                enabled: false,
            },
            NodeColorRule {
                match_name: "F".into(),
                color: "#000002".into(),
                enabled: true,
            },
            NodeColorRule {
                match_name: "F".into(),
                color: "#000003".into(),
                enabled: true,
            },
        ];
        assert_eq!(pick_color("F", &NodeRecord::file(), &rules), Some("#000002"));

        rules.per_node_enabled = false;
        assert_eq!(pick_color("F", &NodeRecord::file(), &rules), Some("#2563eb"));
    }

    #[test]
    fn test_disabled_resolver_is_noop() {
        let mut doc = GraphDocument::new().with_node("F", NodeRecord::file());
        let rules = ColorRules {
            enabled: false,
            ..ColorRules::default()
        };
        resolve_colors(&mut doc, &rules);
        assert!(doc.get("F").unwrap().color.is_none());
    }

    #[test]
    fn test_invalid_palette_entry_degrades() {
        let mut doc = GraphDocument::new().with_node("F", NodeRecord::file());
        let mut rules = ColorRules::default();
        rules.role_colors.file = "blue".into();
        resolve_colors(&mut doc, &rules);
        let f = doc.get("F").unwrap();
        assert_eq!(f.color.as_deref(), Some(DEFAULT_COLOR));
        assert_eq!(f.stroke_color.as_deref(), Some("#626262"));
    }
}
