// src/graph/verify.rs
//! Structural invariant checks for an expanded document.

use std::fmt;

use super::types::GraphDocument;

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `from` links to an id that is not a node.
    Dangling { from: String, to: String },
    /// `from` links to `to` but not the other way round.
    Asymmetric { from: String, to: String },
    /// Both directions exist with different payloads.
    PayloadMismatch { a: String, b: String },
    /// A node id still contains the separator.
    UnexpandedCompound { id: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling { from, to } => write!(f, "{from} -> {to}: target does not exist"),
            Self::Asymmetric { from, to } => write!(f, "{from} -> {to}: no link back"),
            Self::PayloadMismatch { a, b } => write!(f, "{a} <-> {b}: payloads differ"),
            Self::UnexpandedCompound { id } => write!(f, "{id}: still a compound identifier"),
        }
    }
}

/// Result of checking one document.
#[derive(Debug, Clone, Default)]
pub struct InvariantReport {
    pub violations: Vec<Violation>,
}

impl InvariantReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks link integrity, symmetry and identifier cleanliness.
#[must_use]
pub fn check(doc: &GraphDocument, separator: char) -> InvariantReport {
    let mut violations = Vec::new();

    for (id, node) in &doc.nodes {
        if id.contains(separator) {
            violations.push(Violation::UnexpandedCompound { id: id.clone() });
        }
        for (neighbor, payload) in &node.links {
            let Some(other) = doc.get(neighbor) else {
                violations.push(Violation::Dangling {
                    from: id.clone(),
                    to: neighbor.clone(),
                });
                continue;
            };
            match other.links.get(id) {
                None => violations.push(Violation::Asymmetric {
                    from: id.clone(),
                    to: neighbor.clone(),
                }),
                // Report each mismatched pair once.
                Some(back) if back != payload && id < neighbor => {
                    violations.push(Violation::PayloadMismatch {
                        a: id.clone(),
                        b: neighbor.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    InvariantReport { violations }
}
