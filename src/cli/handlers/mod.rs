// src/cli/handlers/mod.rs
pub mod report;
pub mod settings;

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use super::args::SourceArgs;
use crate::color::hex;
use crate::config::{ExpansionPolicy, Settings};
use crate::exit::TagTreeExit;
use crate::graph::{check_invariants, GraphDocument};
use crate::pipeline::{Pipeline, RewriteOutcome};

/// Handles the expand command.
///
/// # Errors
/// Returns error if inputs cannot be read or the output cannot be written.
pub fn handle_expand(source: &SourceArgs, output: Option<&Path>, no_colors: bool) -> Result<TagTreeExit> {
    let Some(mut doc) = read_document(&source.input)? else {
        return Ok(TagTreeExit::InvalidInput);
    };
    let mut pipeline = build_pipeline(source)?;
    if no_colors {
        pipeline.rules.enabled = false;
    }

    let outcome = pipeline.rewrite(&mut doc);
    report::print_outcome(&outcome);

    let json = doc.to_json_pretty()?;
    match output {
        Some(path) => fs::write(path, json).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(TagTreeExit::Success)
}

/// Handles the check command.
///
/// # Errors
/// Returns error if inputs cannot be read.
pub fn handle_check(source: &SourceArgs) -> Result<TagTreeExit> {
    let Some(mut doc) = read_document(&source.input)? else {
        return Ok(TagTreeExit::InvalidInput);
    };
    let pipeline = build_pipeline(source)?;

    let outcome = pipeline.rewrite(&mut doc);
    report::print_outcome(&outcome);

    let invariants = check_invariants(&doc, pipeline.expander.policy().separator);
    let bad_colors: Vec<&str> = if pipeline.rules.enabled {
        doc.nodes
            .iter()
            .filter(|(_, n)| !has_valid_colors(n.color.as_deref(), n.stroke_color.as_deref()))
            .map(|(id, _)| id.as_str())
            .collect()
    } else {
        Vec::new()
    };
    report::print_invariants(&invariants, &bad_colors);

    let clean = invariants.is_clean()
        && bad_colors.is_empty()
        && matches!(outcome, RewriteOutcome::Rewritten(_));
    if clean {
        Ok(TagTreeExit::Success)
    } else {
        Ok(TagTreeExit::InvariantViolation)
    }
}

fn has_valid_colors(color: Option<&str>, stroke: Option<&str>) -> bool {
    color.is_some_and(hex::is_valid) && stroke.is_some_and(hex::is_valid)
}

fn build_pipeline(source: &SourceArgs) -> Result<Pipeline> {
    let mut policy = ExpansionPolicy::load(&source.config)
        .with_context(|| format!("loading {}", source.config.display()))?;
    if let Some(redirect) = source.redirect {
        policy.redirect = redirect;
    }
    let settings = Settings::load(&source.settings)
        .with_context(|| format!("loading {}", source.settings.display()))?;
    Ok(Pipeline::from_settings(&settings, policy))
}

/// Reads and parses the graph. `None` means the input was not a graph document.
fn read_document(input: &Path) -> Result<Option<GraphDocument>> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?
    };

    match GraphDocument::from_json(&content) {
        Ok(doc) => Ok(Some(doc)),
        Err(e) => {
            report::print_invalid_input(input, &e);
            Ok(None)
        }
    }
}
