// src/graph/mod.rs
//! Hierarchy expansion for nested tag graphs.
//!
//! Compound tag ids such as `#Root|Mid|Leaf` are rewritten into one tag node
//! per level, chained parent to child, with file links moved onto the
//! policy's redirect target.

pub mod expand;
pub mod index;
pub mod redirect;
pub mod segments;
pub mod types;
pub mod verify;

pub use expand::{ExpansionReport, HierarchyExpander};
pub use segments::{strip_marker, CompoundId, Segmenter};
pub use types::{GraphDocument, LinkPayload, Links, NodeKind, NodeRecord, Role, DISPLAY_ALIASES};
pub use verify::{check as check_invariants, InvariantReport, Violation};
