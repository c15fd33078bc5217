// src/config/io.rs
//! Loading and saving of settings and policy files.

use std::fs;
use std::path::Path;

use super::policy::{ExpansionPolicy, TagTreeToml};
use super::types::Settings;
use crate::error::{Result, TagTreeError};

/// Default settings file name.
pub const SETTINGS_FILE: &str = "data.json";
/// Default policy file name.
pub const POLICY_FILE: &str = "tagtree.toml";

/// Reads settings, backfilling every missing field. A missing file yields defaults.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<Settings> {
    match read_optional(path)? {
        Some(content) if !content.trim().is_empty() => parse_settings(&content),
        _ => Ok(Settings::default()),
    }
}

/// Parses a settings document.
///
/// # Errors
/// Returns error on invalid JSON.
pub fn parse_settings(content: &str) -> Result<Settings> {
    Ok(serde_json::from_str(content)?)
}

/// Writes settings as pretty JSON.
///
/// # Errors
/// Returns error if serialization or the write fails.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let content = serde_json::to_string_pretty(settings)?;
    write(path, &content)
}

/// Reads the `[expansion]` table. A missing file yields defaults.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_policy(path: &Path) -> Result<ExpansionPolicy> {
    match read_optional(path)? {
        Some(content) => parse_policy(&content),
        None => Ok(ExpansionPolicy::default()),
    }
}

/// Parses tagtree.toml content.
///
/// # Errors
/// Returns error on invalid TOML.
pub fn parse_policy(content: &str) -> Result<ExpansionPolicy> {
    let parsed: TagTreeToml = toml::from_str(content)?;
    Ok(parsed.expansion)
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| TagTreeError::Io {
            source,
            path: path.to_path_buf(),
        })
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| TagTreeError::Io {
        source,
        path: path.to_path_buf(),
    })
}
