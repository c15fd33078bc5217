// src/graph/expand.rs
//! Rewrites compound tag nodes into a linked chain of hierarchy nodes.

use serde_json::Value;
use tracing::{debug, error, warn};

use super::index::CrossRefIndex;
use super::redirect;
use super::segments::{CompoundId, Segmenter};
use super::types::{GraphDocument, NodeRecord, Role};
use crate::config::ExpansionPolicy;
use crate::error::{Result, TagTreeError};

/// Outcome of one expansion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    /// Compound ids that were rewritten, in processing order.
    pub expanded: Vec<String>,
    /// Compound ids left untouched, with the reason.
    pub skipped: Vec<(String, String)>,
    pub nodes_created: usize,
    pub links_redirected: usize,
    /// Set when the whole pass was rolled back.
    pub aborted: Option<String>,
}

impl ExpansionReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.aborted.is_none()
    }
}

/// Expands compound tag identifiers according to an [`ExpansionPolicy`].
#[derive(Debug, Clone)]
pub struct HierarchyExpander {
    policy: ExpansionPolicy,
    segmenter: Segmenter,
}

impl Default for HierarchyExpander {
    fn default() -> Self {
        Self::new(ExpansionPolicy::default())
    }
}

impl HierarchyExpander {
    #[must_use]
    pub fn new(policy: ExpansionPolicy) -> Self {
        let segmenter = Segmenter::new(&policy);
        Self { policy, segmenter }
    }

    #[must_use]
    pub fn policy(&self) -> &ExpansionPolicy {
        &self.policy
    }

    #[must_use]
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Expands `doc` in place.
    ///
    /// Malformed or colliding compound ids are skipped individually. If the
    /// pass fails as a whole, `doc` is left exactly as it was handed in.
    pub fn expand(&self, doc: &mut GraphDocument) -> ExpansionReport {
        let mut working = doc.clone();
        match self.try_expand(&mut working) {
            Ok(report) => {
                *doc = working;
                report
            }
            Err(e) => {
                error!(error = %e, "expansion aborted, document left unmodified");
                ExpansionReport {
                    aborted: Some(e.to_string()),
                    ..ExpansionReport::default()
                }
            }
        }
    }

    /// Expands `doc` directly. On error the document may be half rewritten.
    ///
    /// # Errors
    /// Returns error only on internal failures (broken ordering invariants).
    pub fn try_expand(&self, doc: &mut GraphDocument) -> Result<ExpansionReport> {
        let mut report = ExpansionReport::default();
        let compounds = self.discover(doc, &mut report)?;
        let index = CrossRefIndex::build(doc, &compounds);

        for compound in &compounds {
            report.nodes_created += self.materialize(doc, compound, &index)?;

            let target = self
                .policy
                .target_of(&compound.chain)
                .ok_or_else(|| TagTreeError::malformed(&compound.raw, "empty chain"))?;
            report.links_redirected += redirect::redirect(doc, &compound.raw, target)?;

            doc.nodes.remove(&compound.raw);
            report.expanded.push(compound.raw.clone());
        }

        self.normalize(doc);
        Ok(report)
    }

    /// Finds compound tag nodes and validates them before any mutation.
    fn discover(
        &self,
        doc: &GraphDocument,
        report: &mut ExpansionReport,
    ) -> Result<Vec<CompoundId>> {
        let mut valid = Vec::new();

        for (id, node) in &doc.nodes {
            if !node.is_tag() || !self.segmenter.is_compound(id) {
                continue;
            }
            match self.validate(doc, id) {
                Ok(compound) => valid.push(compound),
                Err(e) if e.is_recoverable() => {
                    warn!(id = %id, reason = %e, "skipping compound tag");
                    report.skipped.push((id.clone(), e.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(valid)
    }

    fn validate(&self, doc: &GraphDocument, id: &str) -> Result<CompoundId> {
        let compound = self.segmenter.parse(id)?;
        for segment in &compound.chain {
            if let Some(existing) = doc.get(segment) {
                if !existing.is_tag() {
                    return Err(TagTreeError::IdentifierCollision {
                        id: segment.clone(),
                        existing: existing.kind.label().to_string(),
                    });
                }
            }
        }
        Ok(compound)
    }

    /// Creates or merges one node per level and links consecutive levels.
    fn materialize(
        &self,
        doc: &mut GraphDocument,
        compound: &CompoundId,
        index: &CrossRefIndex,
    ) -> Result<usize> {
        let mut created = 0;

        for (depth, id) in compound.chain.iter().enumerate() {
            let segment = compound.segments.get(depth).map_or(id.as_str(), String::as_str);
            let display = self.segmenter.display_name(segment);
            if !doc.contains(id) {
                debug!(id = %id, depth, "creating hierarchy node");
                doc.nodes.insert(id.clone(), NodeRecord::tag());
                created += 1;
            }
            let Some(node) = doc.nodes.get_mut(id) else {
                return Err(TagTreeError::MissingTarget { id: id.clone() });
            };
            if !node.is_tag() {
                return Err(TagTreeError::IdentifierCollision {
                    id: id.clone(),
                    existing: node.kind.label().to_string(),
                });
            }

            node.display_name = Some(display);
            let level = node.level.map_or(depth, |l| l.min(depth));
            node.level = Some(level);
            node.role = Some(Role::for_level(level));

            if depth > 0 {
                node.merge_related(&index.files_for(id), &index.compounds_for(id));
                let parent = &compound.chain[depth - 1];
                doc.link(parent, id, Value::Bool(true));
            }
        }

        Ok(created)
    }

    /// Sets display text and role on every node, including untouched ones.
    ///
    /// Skipped compound nodes get no display text or role here. Their links
    /// may still have been re-keyed by a neighbor's redirect.
    fn normalize(&self, doc: &mut GraphDocument) {
        let names: Vec<(String, String)> = doc
            .nodes
            .iter()
            .filter(|(id, node)| node.is_tag() && !self.segmenter.is_compound(id))
            .map(|(id, node)| (id.clone(), self.display_of(doc, id, node)))
            .collect();

        for (id, name) in names {
            let Some(node) = doc.nodes.get_mut(&id) else {
                continue;
            };
            node.display_name = Some(name);
            if node.role.is_none() {
                let level = *node.level.get_or_insert(0);
                node.role = Some(Role::for_level(level));
            }
        }
        for node in doc.nodes.values_mut().filter(|n| n.is_file()) {
            node.role = Some(Role::File);
        }
    }

    /// Scoped identities only exist below the root, under an existing root tag.
    fn display_of(&self, doc: &GraphDocument, id: &str, node: &NodeRecord) -> String {
        let bare = if node.level.unwrap_or(0) > 0 {
            self.segmenter
                .unscoped(id, |root| doc.get(root).is_some_and(NodeRecord::is_tag))
        } else {
            id
        };
        self.segmenter.display_name(bare)
    }
}
