// src/cli/handlers/settings.rs
//! `tagtree settings`: the command-line settings panel.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::cli::args::{Feature, SettingsAction};
use crate::color::hex;
use crate::config::Settings;
use crate::exit::TagTreeExit;

/// Handles the settings command. Every edit is saved immediately.
///
/// # Errors
/// Returns error if the settings cannot be loaded, edited or saved.
pub fn handle_settings(file: &Path, action: SettingsAction) -> Result<TagTreeExit> {
    let mut settings =
        Settings::load(file).with_context(|| format!("loading {}", file.display()))?;

    if matches!(action, SettingsAction::Show) {
        print_settings(&settings);
        return Ok(TagTreeExit::Success);
    }

    apply(&mut settings, action)?;
    settings
        .save(file)
        .with_context(|| format!("saving {}", file.display()))?;
    print_settings(&settings);
    Ok(TagTreeExit::Success)
}

/// Applies one edit to `settings`.
///
/// # Errors
/// Returns error on an out-of-range rule index.
pub fn apply(settings: &mut Settings, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {}
        SettingsAction::ResetColors => settings.reset_colors(),
        SettingsAction::AddRule => {
            settings.add_rule();
        }
        SettingsAction::RemoveRule { index } => {
            settings.remove_rule(index)?;
        }
        SettingsAction::SetRule {
            index,
            name,
            color,
            enabled,
        } => settings.set_rule(index, name, color, enabled)?,
        SettingsAction::Toggle { feature, on } => match feature {
            Feature::Colors => settings.set_custom_colors(on),
            Feature::Rules => settings.set_custom_node_colors(on),
        },
    }
    Ok(())
}

fn print_settings(s: &Settings) {
    println!("{}", "PALETTE".cyan().bold());
    let p = &s.colors;
    for (label, color) in [
        ("files", &p.file_nodes),
        ("root tags", &p.root_tags),
        ("level 1", &p.child_level1),
        ("level 2", &p.child_level2),
        ("level 3", &p.child_level3),
    ] {
        println!("  {label:<10} {}", paint(color));
    }
    println!("  custom colors: {}", on_off(s.enable_custom_colors));

    println!("{}", "NODE RULES".cyan().bold());
    println!("  enabled: {}", on_off(s.enable_custom_node_colors));
    if s.custom_node_colors.is_empty() {
        println!("  (none)");
    }
    for (i, rule) in s.custom_node_colors.iter().enumerate() {
        let state = if rule.enabled { "on" } else { "off" };
        println!("  [{i}] {:<20} {} {state}", rule.node_name, paint(&rule.color));
    }
}

fn paint(color: &str) -> String {
    if hex::is_valid(color) {
        color.to_string()
    } else {
        format!("{} {}", color, "(invalid, default used)".red())
    }
}

fn on_off(flag: bool) -> String {
    if flag {
        "on".green().to_string()
    } else {
        "off".red().to_string()
    }
}
