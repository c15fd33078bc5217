//! Routes parsed subcommands to their handlers.

use super::args::Commands;
use super::handlers::{handle_check, handle_expand, settings::handle_settings};
use crate::exit::TagTreeExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<TagTreeExit> {
    match command {
        Commands::Expand {
            source,
            output,
            no_colors,
        } => handle_expand(&source, output.as_deref(), no_colors),
        Commands::Check { source } => handle_check(&source),
        Commands::Settings { file, action } => handle_settings(&file, action),
    }
}
