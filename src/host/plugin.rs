// src/host/plugin.rs
//! Plugin lifecycle: load settings, hook views, react to settings edits.

use std::path::{Path, PathBuf};

use tracing::info;

use super::registry::{GraphView, ViewRegistry};
use crate::config::{ExpansionPolicy, Settings};
use crate::error::Result;
use crate::pipeline::Pipeline;

/// Owns the persisted settings and the view registry.
pub struct TagTreePlugin {
    settings_path: PathBuf,
    settings: Settings,
    policy: ExpansionPolicy,
    registry: ViewRegistry,
}

impl TagTreePlugin {
    /// Loads settings and policy, defaults backfilled.
    ///
    /// # Errors
    /// Returns error if either file exists but cannot be parsed.
    pub fn load(settings_path: &Path, policy_path: &Path) -> Result<Self> {
        let settings = Settings::load(settings_path)?;
        let policy = ExpansionPolicy::load(policy_path)?;
        Ok(Self::with(settings_path.to_path_buf(), settings, policy))
    }

    #[must_use]
    pub fn with(settings_path: PathBuf, settings: Settings, policy: ExpansionPolicy) -> Self {
        let registry = ViewRegistry::new(Pipeline::from_settings(&settings, policy.clone()));
        Self {
            settings_path,
            settings,
            policy,
            registry,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Host layout changed: hook any new graph views.
    pub fn on_layout_change(&mut self, views: &mut [GraphView]) -> usize {
        self.registry.on_layout_change(views)
    }

    /// Plugin unloading: restore every original renderer.
    pub fn on_unload(&mut self, views: &mut [GraphView]) -> usize {
        let restored = self.registry.teardown(views);
        info!(restored, "render hooks removed");
        restored
    }

    /// Applies an edit, persists it, and swaps the live color rules.
    ///
    /// Returns ids of hooked views that should re-render.
    ///
    /// # Errors
    /// Returns error if the edit fails or the settings cannot be saved.
    pub fn update_settings<F>(&mut self, edit: F) -> Result<Vec<String>>
    where
        F: FnOnce(&mut Settings) -> Result<()>,
    {
        let mut next = self.settings.clone();
        edit(&mut next)?;
        next.save(&self.settings_path)?;

        let rules = next.to_color_rules(&self.policy);
        self.registry.update(|pipeline| pipeline.rules = rules);
        self.settings = next;
        Ok(self.registry.hooked_views())
    }
}
