use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::io::{POLICY_FILE, SETTINGS_FILE};
use crate::config::RedirectTarget;

#[derive(Parser)]
#[command(name = "tagtree", version, about = "Nested tag graph expander")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Where to read the rewrite inputs from.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Graph document (JSON). Use `-` for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Settings document with colors and rules
    #[arg(long, value_name = "FILE", default_value = SETTINGS_FILE)]
    pub settings: PathBuf,
    /// Expansion policy
    #[arg(long, value_name = "FILE", default_value = POLICY_FILE)]
    pub config: PathBuf,
    /// Override the policy's redirect target
    #[arg(long, value_enum)]
    pub redirect: Option<RedirectTarget>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand nested tags and resolve node colors
    Expand {
        #[command(flatten)]
        source: SourceArgs,
        /// Write the result here instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Skip color resolution
        #[arg(long)]
        no_colors: bool,
    },
    /// Expand and verify link integrity, symmetry and colors
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Inspect or edit the settings document
    Settings {
        #[arg(long = "settings", value_name = "FILE", default_value = SETTINGS_FILE)]
        file: PathBuf,
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsAction {
    /// Print the resolved settings
    Show,
    /// Restore the default palette
    ResetColors,
    /// Append a placeholder color rule
    AddRule,
    /// Delete a color rule
    RemoveRule { index: usize },
    /// Edit a color rule
    SetRule {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, action = ArgAction::Set)]
        enabled: Option<bool>,
    },
    /// Turn a color feature on or off
    Toggle {
        #[arg(value_enum)]
        feature: Feature,
        #[arg(action = ArgAction::Set)]
        on: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Role/level palette coloring
    Colors,
    /// Per-node name rules
    Rules,
}
