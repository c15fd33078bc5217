pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod exit;
pub mod graph;
pub mod host;
pub mod logging;
pub mod pipeline;

pub use color::{resolve_colors, ColorRules};
pub use graph::{GraphDocument, HierarchyExpander};
pub use pipeline::{Pipeline, RewriteOutcome};
