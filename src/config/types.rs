use serde::{Deserialize, Serialize};

/// Fallback palette keyed by structural role. Persisted as `colors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    #[serde(default = "default_file_nodes")]
    pub file_nodes: String,
    #[serde(default = "default_root_tags")]
    pub root_tags: String,
    #[serde(default = "default_child_level1")]
    pub child_level1: String,
    #[serde(default = "default_child_level2")]
    pub child_level2: String,
    #[serde(default = "default_child_level3")]
    pub child_level3: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            file_nodes: default_file_nodes(),
            root_tags: default_root_tags(),
            child_level1: default_child_level1(),
            child_level2: default_child_level2(),
            child_level3: default_child_level3(),
        }
    }
}

fn default_file_nodes() -> String { "#2563eb".to_string() }
fn default_root_tags() -> String { "#16a34a".to_string() }
fn default_child_level1() -> String { "#fb923c".to_string() }
fn default_child_level2() -> String { "#ea580c".to_string() }
fn default_child_level3() -> String { "#dc2626".to_string() }

/// A user-defined color for nodes matching `node_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomNodeColor {
    #[serde(default)]
    pub node_name: String,
    #[serde(default = "default_rule_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CustomNodeColor {
    fn default() -> Self {
        Self {
            node_name: default_rule_name(),
            color: default_rule_color(),
            enabled: true,
        }
    }
}

fn default_rule_name() -> String { "new-node".to_string() }
fn default_rule_color() -> String { "#ff0000".to_string() }
const fn default_true() -> bool { true }

/// Persisted settings document (`data.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub colors: Palette,
    #[serde(default)]
    pub custom_node_colors: Vec<CustomNodeColor>,
    #[serde(default = "default_true")]
    pub enable_custom_colors: bool,
    #[serde(default = "default_true")]
    pub enable_custom_node_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colors: Palette::default(),
            custom_node_colors: Vec::new(),
            enable_custom_colors: true,
            enable_custom_node_colors: true,
        }
    }
}
