// src/config/mod.rs
pub mod io;
pub mod policy;
pub mod types;

pub use self::policy::{ExpansionPolicy, RedirectTarget, SharedSegments, TagTreeToml};
pub use self::types::{CustomNodeColor, Palette, Settings};

use crate::color::{ColorRules, NodeColorRule, RoleColors};
use crate::error::{Result, TagTreeError};
use std::path::Path;

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from `path`, defaults for anything missing.
    ///
    /// # Errors
    /// Returns error if the file exists but is unreadable or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        io::load_settings(path)
    }

    /// Saves settings to `path`.
    ///
    /// # Errors
    /// Returns error if the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        io::save_settings(path, self)
    }

    /// Appends a placeholder rule and returns its index.
    pub fn add_rule(&mut self) -> usize {
        self.custom_node_colors.push(CustomNodeColor::default());
        self.custom_node_colors.len() - 1
    }

    /// Removes the rule at `index`.
    ///
    /// # Errors
    /// Returns error if `index` is out of range.
    pub fn remove_rule(&mut self, index: usize) -> Result<CustomNodeColor> {
        self.check_index(index)?;
        Ok(self.custom_node_colors.remove(index))
    }

    /// Edits the rule at `index`; `None` leaves a field unchanged.
    ///
    /// # Errors
    /// Returns error if `index` is out of range.
    pub fn set_rule(
        &mut self,
        index: usize,
        name: Option<String>,
        color: Option<String>,
        enabled: Option<bool>,
    ) -> Result<()> {
        self.check_index(index)?;
        let Some(rule) = self.custom_node_colors.get_mut(index) else {
            return Ok(());
        };
        if let Some(name) = name {
            rule.node_name = name;
        }
        if let Some(color) = color {
            rule.color = color;
        }
        if let Some(enabled) = enabled {
            rule.enabled = enabled;
        }
        Ok(())
    }

    /// Restores the five palette entries. Rules are left alone.
    pub fn reset_colors(&mut self) {
        self.colors = Palette::default();
    }

    pub fn set_custom_colors(&mut self, enabled: bool) {
        self.enable_custom_colors = enabled;
    }

    pub fn set_custom_node_colors(&mut self, enabled: bool) {
        self.enable_custom_node_colors = enabled;
    }

    /// Converts to the resolver's rule value.
    #[must_use]
    pub fn to_color_rules(&self, policy: &ExpansionPolicy) -> ColorRules {
        ColorRules {
            enabled: self.enable_custom_colors,
            per_node_enabled: self.enable_custom_node_colors,
            per_node_rules: self
                .custom_node_colors
                .iter()
                .map(|c| NodeColorRule {
                    match_name: c.node_name.clone(),
                    color: c.color.clone(),
                    enabled: c.enabled,
                })
                .collect(),
            role_colors: RoleColors {
                root_tag: self.colors.root_tags.clone(),
                child_levels: vec![
                    self.colors.child_level1.clone(),
                    self.colors.child_level2.clone(),
                    self.colors.child_level3.clone(),
                ],
                file: self.colors.file_nodes.clone(),
            },
            marker: policy.marker.clone(),
            file_extension: policy.file_extension.clone(),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.custom_node_colors.len() {
            Ok(())
        } else {
            Err(TagTreeError::Other(format!(
                "No color rule at index {index} ({} defined)",
                self.custom_node_colors.len()
            )))
        }
    }
}

impl ExpansionPolicy {
    /// Loads the policy from tagtree.toml at `path`.
    ///
    /// # Errors
    /// Returns error if the file exists but is unreadable or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        io::load_policy(path)
    }
}
