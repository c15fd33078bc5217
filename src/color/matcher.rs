// src/color/matcher.rs
//! Name matching for per-node color rules.

/// Names a rule can match against for one node.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub id: &'a str,
    pub display_name: Option<&'a str>,
}

/// True if `rule_name` selects the candidate node.
///
/// A rule matches on the exact id, the id without `extension`, any substring
/// of the id, or the exact display name. Empty names never match.
#[must_use]
pub fn matches(rule_name: &str, candidate: Candidate<'_>, extension: &str) -> bool {
    if rule_name.is_empty() {
        return false;
    }
    rule_name == candidate.id
        || strip_extension(candidate.id, extension) == rule_name
        || candidate.id.contains(rule_name)
        || candidate.display_name == Some(rule_name)
}

fn strip_extension<'a>(id: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() {
        return id;
    }
    id.strip_suffix(extension).unwrap_or(id)
}
