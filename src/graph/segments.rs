// src/graph/segments.rs
//! Parsing of compound tag identifiers into hierarchy segments.

use std::collections::HashSet;

use crate::config::{ExpansionPolicy, SharedSegments};
use crate::error::{Result, TagTreeError};

/// Joins a root and a child segment when shared segments are kept per root.
pub const SCOPE_DELIMITER: &str = "::";

/// A compound identifier split into its ordered segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundId {
    pub raw: String,
    /// Segments as written in `raw`.
    pub segments: Vec<String>,
    /// Node identities, one per level. Equal to the raw segments unless
    /// shared segments are scoped per root.
    pub chain: Vec<String>,
}

impl CompoundId {
    #[must_use]
    pub fn root(&self) -> &str {
        self.chain.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn leaf(&self) -> &str {
        self.chain.last().map_or("", String::as_str)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.chain.len()
    }
}

/// Splits identifiers and derives display text according to the policy.
#[derive(Debug, Clone)]
pub struct Segmenter {
    separator: char,
    marker: String,
    per_root: bool,
}

impl Segmenter {
    #[must_use]
    pub fn new(policy: &ExpansionPolicy) -> Self {
        Self {
            separator: policy.separator,
            marker: policy.marker.clone(),
            per_root: policy.shared_segments == SharedSegments::PerRoot,
        }
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    #[must_use]
    pub fn is_compound(&self, id: &str) -> bool {
        id.contains(self.separator)
    }

    /// Splits a compound identifier. No escaping is recognized.
    ///
    /// # Errors
    /// Returns `MalformedIdentifier` on an empty segment or fewer than two
    /// segments, `DuplicateSegment` if a segment repeats within the path.
    pub fn parse(&self, id: &str) -> Result<CompoundId> {
        let segments: Vec<&str> = id.split(self.separator).collect();

        if segments.len() < 2 {
            return Err(TagTreeError::malformed(id, "needs at least two segments"));
        }
        if let Some(pos) = segments.iter().position(|s| s.is_empty()) {
            return Err(TagTreeError::malformed(
                id,
                format!("empty segment at position {pos}"),
            ));
        }

        let mut seen = HashSet::new();
        for segment in &segments {
            if !seen.insert(*segment) {
                return Err(TagTreeError::DuplicateSegment {
                    id: id.to_string(),
                    segment: (*segment).to_string(),
                });
            }
        }

        Ok(CompoundId {
            raw: id.to_string(),
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
            chain: self.identities(&segments),
        })
    }

    fn identities(&self, segments: &[&str]) -> Vec<String> {
        let root = segments.first().copied().unwrap_or_default();
        segments
            .iter()
            .enumerate()
            .map(|(depth, segment)| {
                if self.per_root && depth > 0 {
                    format!("{root}{SCOPE_DELIMITER}{segment}")
                } else {
                    (*segment).to_string()
                }
            })
            .collect()
    }

    /// Display text: one leading hierarchy marker removed.
    #[must_use]
    pub fn display_name(&self, id: &str) -> String {
        strip_marker(id, &self.marker).to_string()
    }

    /// Segment part of a per-root identity `<root>::<segment>`.
    ///
    /// Only a prefix accepted by `is_root` counts as a scope, so host ids that
    /// merely contain the delimiter come back whole.
    pub fn unscoped<'a>(&self, id: &'a str, is_root: impl Fn(&str) -> bool) -> &'a str {
        if !self.per_root {
            return id;
        }
        for (pos, _) in id.match_indices(SCOPE_DELIMITER) {
            let (Some(root), Some(rest)) = (id.get(..pos), id.get(pos + SCOPE_DELIMITER.len()..))
            else {
                continue;
            };
            if is_root(root) {
                return rest;
            }
        }
        id
    }
}

/// Removes one leading hierarchy marker, if present.
#[must_use]
pub fn strip_marker<'a>(id: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return id;
    }
    id.strip_prefix(marker).unwrap_or(id)
}
