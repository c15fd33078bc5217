// src/pipeline.rs
//! The full rewrite: expansion followed by color resolution.

use std::panic::{self, AssertUnwindSafe};

use tracing::error;

use crate::color::{resolve_colors, ColorRules};
use crate::config::{ExpansionPolicy, Settings};
use crate::graph::{ExpansionReport, GraphDocument, HierarchyExpander};

/// Outcome of a rewrite as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Expansion and coloring ran.
    Rewritten(ExpansionReport),
    /// Something failed; the document is exactly what was handed in.
    PassedThrough { reason: String },
}

impl RewriteOutcome {
    #[must_use]
    pub fn is_rewritten(&self) -> bool {
        matches!(self, Self::Rewritten(_))
    }
}

/// Expander and color rules applied together to each inbound document.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub expander: HierarchyExpander,
    pub rules: ColorRules,
}

impl Pipeline {
    #[must_use]
    pub fn new(expander: HierarchyExpander, rules: ColorRules) -> Self {
        Self { expander, rules }
    }

    #[must_use]
    pub fn from_settings(settings: &Settings, policy: ExpansionPolicy) -> Self {
        let rules = settings.to_color_rules(&policy);
        Self::new(HierarchyExpander::new(policy), rules)
    }

    /// Rewrites `doc` in place. Never fails and never panics outward.
    pub fn rewrite(&self, doc: &mut GraphDocument) -> RewriteOutcome {
        rewrite_with(doc, |doc| {
            let report = self.expander.expand(doc);
            if let Some(reason) = &report.aborted {
                return Err(reason.clone());
            }
            resolve_colors(doc, &self.rules);
            Ok(report)
        })
    }
}

/// Runs `stage` on `doc`, restoring the snapshot if it errors or panics.
fn rewrite_with<F>(doc: &mut GraphDocument, stage: F) -> RewriteOutcome
where
    F: FnOnce(&mut GraphDocument) -> Result<ExpansionReport, String>,
{
    let snapshot = doc.clone();
    let result = panic::catch_unwind(AssertUnwindSafe(|| stage(doc)));

    match result {
        Ok(Ok(report)) => RewriteOutcome::Rewritten(report),
        Ok(Err(reason)) => {
            *doc = snapshot;
            RewriteOutcome::PassedThrough { reason }
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            error!(reason = %reason, "rewrite panicked, passing document through");
            *doc = snapshot;
            RewriteOutcome::PassedThrough { reason }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
