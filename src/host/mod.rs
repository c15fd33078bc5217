// src/host/mod.rs
//! Glue between the rendering host and the rewrite pipeline.

pub mod hook;
pub mod plugin;
pub mod registry;

pub use hook::{HookedRenderer, Renderer, SharedPipeline};
pub use plugin::TagTreePlugin;
pub use registry::{GraphView, ViewRegistry};
