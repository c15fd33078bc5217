// src/graph/types.rs
//! Core types for the graph document handed over by the rendering host.
//!
//! Nodes and their links live in one mapping; there is no separate edge list.
//! Fields the host sends that this crate does not model are carried through
//! untouched in `extra`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::error::Result;

/// Opaque link payload. Preserved as-is, never reinterpreted.
pub type LinkPayload = Value;

/// Neighbor identifier -> payload.
pub type Links = BTreeMap<String, LinkPayload>;

/// Every display-text field the renderer may read. All carry the same value.
pub const DISPLAY_ALIASES: [&str; 7] = [
    "displayName",
    "displayText",
    "name",
    "path",
    "title",
    "label",
    "text",
];

/// Node type as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Tag,
    File,
    /// Any host type this crate does not understand (kept verbatim).
    Other(String),
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "tag" => Self::Tag,
            "file" => Self::File,
            _ => Self::Other(s),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.label().to_string()
    }
}

impl NodeKind {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Tag => "tag",
            Self::File => "file",
            Self::Other(s) => s,
        }
    }
}

/// Structural classification derived during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    RootTag,
    ChildNode,
    File,
}

impl Role {
    /// Role implied by a tag's depth in the hierarchy.
    #[must_use]
    pub fn for_level(level: usize) -> Self {
        if level == 0 {
            Self::RootTag
        } else {
            Self::ChildNode
        }
    }
}

/// A single node of the graph document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub struct NodeRecord {
    pub kind: NodeKind,
    pub links: Links,
    /// Canonical display text, projected onto every alias on output.
    pub display_name: Option<String>,
    pub level: Option<usize>,
    pub role: Option<Role>,
    pub related_files: Option<BTreeSet<String>>,
    pub aliases: Option<BTreeSet<String>>,
    pub color: Option<String>,
    pub stroke_color: Option<String>,
    pub extra: Map<String, Value>,
}

impl NodeRecord {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            links: Links::new(),
            display_name: None,
            level: None,
            role: None,
            related_files: None,
            aliases: None,
            color: None,
            stroke_color: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn tag() -> Self {
        Self::new(NodeKind::Tag)
    }

    #[must_use]
    pub fn file() -> Self {
        Self::new(NodeKind::File)
    }

    /// Builder-style link insertion. Only touches this node's side.
    #[must_use]
    pub fn with_link(mut self, neighbor: impl Into<String>, payload: LinkPayload) -> Self {
        self.links.insert(neighbor.into(), payload);
        self
    }

    #[must_use]
    pub fn is_tag(&self) -> bool {
        self.kind == NodeKind::Tag
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Additive merge of cross-reference metadata.
    pub fn merge_related(&mut self, files: &BTreeSet<String>, compounds: &BTreeSet<String>) {
        self.related_files
            .get_or_insert_with(BTreeSet::new)
            .extend(files.iter().cloned());
        self.aliases
            .get_or_insert_with(BTreeSet::new)
            .extend(compounds.iter().cloned());
    }

    /// Host-facing JSON object with every display alias filled in.
    #[must_use]
    pub fn project(&self) -> Map<String, Value> {
        let mut out = self.extra.clone();
        out.insert("type".into(), Value::String(self.kind.label().to_string()));
        out.insert(
            "links".into(),
            Value::Object(self.links.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        );

        if let Some(name) = &self.display_name {
            for alias in DISPLAY_ALIASES {
                out.insert(alias.into(), Value::String(name.clone()));
            }
        }

        insert_opt(&mut out, "level", self.level.map(Value::from));
        insert_opt(
            &mut out,
            "role",
            self.role.and_then(|r| serde_json::to_value(r).ok()),
        );
        insert_opt(&mut out, "relatedFiles", self.related_files.as_ref().map(set_value));
        insert_opt(&mut out, "aliases", self.aliases.as_ref().map(set_value));
        insert_opt(&mut out, "color", self.color.clone().map(Value::String));
        insert_opt(&mut out, "strokeColor", self.stroke_color.clone().map(Value::String));
        out
    }
}

fn insert_opt(out: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        out.insert(key.into(), v);
    }
}

fn set_value(set: &BTreeSet<String>) -> Value {
    Value::Array(set.iter().cloned().map(Value::String).collect())
}

impl Serialize for NodeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.project().serialize(serializer)
    }
}

/// Wire shape of a node. Everything past `type` and `links` is picked out of
/// `extra` leniently, see [`take_field`].
#[derive(Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    links: Links,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawNode> for NodeRecord {
    fn from(raw: RawNode) -> Self {
        let mut extra = raw.extra;
        let mut display_name = None;
        for alias in DISPLAY_ALIASES {
            if let Some(Value::String(s)) = extra.remove(alias) {
                display_name.get_or_insert(s);
            }
        }

        Self {
            kind: raw.kind,
            links: raw.links,
            display_name,
            level: take_field(&mut extra, "level"),
            role: take_field(&mut extra, "role"),
            related_files: take_field(&mut extra, "relatedFiles"),
            aliases: take_field(&mut extra, "aliases"),
            color: take_field(&mut extra, "color"),
            stroke_color: take_field(&mut extra, "strokeColor"),
            extra,
        }
    }
}

/// Moves `key` out of `extra` if it has the expected shape.
///
/// A value of any other shape stays in `extra` and is passed through, so one
/// odd field never fails the whole document.
fn take_field<T: DeserializeOwned>(extra: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = extra.remove(key)?;
    match serde_json::from_value::<Option<T>>(value.clone()) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(field = key, error = %e, "keeping unrecognized node field verbatim");
            extra.insert(key.to_string(), value);
            None
        }
    }
}

/// The whole document: node mapping plus any other host fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GraphDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the host JSON shape.
    ///
    /// # Errors
    /// Returns error if the input is not a valid graph document.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serializes with display aliases projected.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_node(mut self, id: impl Into<String>, node: NodeRecord) -> Self {
        self.nodes.insert(id.into(), node);
        self
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Links two existing nodes on both sides.
    ///
    /// An existing payload on `a` wins and is mirrored onto `b`, so the pair
    /// always ends up with equal payloads. Returns false if either node is
    /// missing.
    pub fn link(&mut self, a: &str, b: &str, payload: LinkPayload) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let existing = self.nodes.get(a).and_then(|n| n.links.get(b)).cloned();
        let payload = existing.unwrap_or(payload);

        if let Some(node) = self.nodes.get_mut(a) {
            node.links.insert(b.to_string(), payload.clone());
        }
        if let Some(node) = self.nodes.get_mut(b) {
            node.links.insert(a.to_string(), payload);
        }
        true
    }

    /// Ids of every node holding `target` in its links, in key order.
    #[must_use]
    pub fn holders_of(&self, target: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.links.contains_key(target))
            .map(|(id, _)| id.clone())
            .collect()
    }
}
