// src/graph/redirect.rs
//! Moves every connection of a compound node onto its designated target.

use tracing::debug;

use super::types::GraphDocument;
use crate::error::{Result, TagTreeError};

/// Redirects links from `compound` to `target`, updating both sides.
///
/// Nodes holding `compound` in their links get the payload re-keyed to
/// `target`, and `target` gets the reciprocal entry. Links the compound node
/// held toward neighbors that did not link back are carried over as well.
/// The compound node itself is left in place for the caller to delete.
/// Returns the number of redirected connections.
///
/// # Errors
/// Returns `MissingTarget` if `target` was not materialized first.
pub fn redirect(doc: &mut GraphDocument, compound: &str, target: &str) -> Result<usize> {
    if !doc.contains(target) {
        return Err(TagTreeError::MissingTarget {
            id: target.to_string(),
        });
    }

    let mut moved = 0;

    for holder in doc.holders_of(compound) {
        if holder == compound {
            continue;
        }
        let payload = doc
            .nodes
            .get_mut(&holder)
            .and_then(|node| node.links.remove(compound));

        let Some(payload) = payload else { continue };
        if holder == target {
            continue;
        }
        if doc.link(&holder, target, payload) {
            debug!(from = %holder, compound, target, "redirected link");
            moved += 1;
        }
    }

    let outbound: Vec<_> = doc
        .get(compound)
        .map(|node| {
            node.links
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default();

    for (neighbor, payload) in outbound {
        if neighbor == target || neighbor == compound || !doc.contains(&neighbor) {
            continue;
        }
        let already = doc
            .get(&neighbor)
            .is_some_and(|n| n.links.contains_key(target));
        if !already && doc.link(&neighbor, target, payload) {
            moved += 1;
        }
    }

    Ok(moved)
}
