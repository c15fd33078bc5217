// src/cli/handlers/report.rs
//! Terminal output for expand/check. Everything goes to stderr.

use colored::Colorize;
use std::path::Path;

use crate::error::TagTreeError;
use crate::graph::InvariantReport;
use crate::pipeline::RewriteOutcome;

pub fn print_outcome(outcome: &RewriteOutcome) {
    match outcome {
        RewriteOutcome::Rewritten(report) => {
            eprintln!(
                "{} {} expanded | {} created | {} redirected | {} skipped",
                "EXPAND".cyan().bold(),
                report.expanded.len().to_string().green(),
                report.nodes_created,
                report.links_redirected,
                format_count(report.skipped.len()),
            );
            for (id, reason) in &report.skipped {
                eprintln!("  {} {id}: {reason}", "skipped".yellow());
            }
        }
        RewriteOutcome::PassedThrough { reason } => {
            eprintln!(
                "{} document passed through unmodified: {reason}",
                "EXPAND".red().bold()
            );
        }
    }
}

pub fn print_invariants(report: &InvariantReport, bad_colors: &[&str]) {
    if report.is_clean() && bad_colors.is_empty() {
        eprintln!("{}", "  ✓ Links, symmetry and colors are consistent.".green());
        return;
    }
    for v in &report.violations {
        eprintln!("  {} {v}", "✗".red());
    }
    for id in bad_colors {
        eprintln!("  {} {id}: invalid or missing color", "✗".red());
    }
}

pub fn print_invalid_input(path: &Path, err: &TagTreeError) {
    eprintln!(
        "{} {} is not a graph document: {err}",
        "Error:".red(),
        path.display()
    );
}

fn format_count(n: usize) -> String {
    if n == 0 {
        n.to_string().green().to_string()
    } else {
        n.to_string().yellow().to_string()
    }
}
