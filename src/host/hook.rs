// src/host/hook.rs
//! Render callback wrapper that rewrites every document before forwarding.

use std::sync::{Arc, RwLock};

use tracing::error;

use crate::graph::GraphDocument;
use crate::pipeline::{Pipeline, RewriteOutcome};

/// Pipeline shared between all hooked views and the settings surface.
///
/// Settings updates take the write lock, so they never overlap a rewrite.
pub type SharedPipeline = Arc<RwLock<Pipeline>>;

/// The host's render callback.
pub trait Renderer: Send {
    fn set_data(&mut self, document: GraphDocument);
}

impl<F> Renderer for F
where
    F: FnMut(GraphDocument) + Send,
{
    fn set_data(&mut self, document: GraphDocument) {
        self(document);
    }
}

/// Wraps an original renderer. Forwards exactly once per call.
pub struct HookedRenderer {
    original: Box<dyn Renderer>,
    pipeline: SharedPipeline,
    last_outcome: Option<RewriteOutcome>,
}

impl HookedRenderer {
    #[must_use]
    pub fn new(original: Box<dyn Renderer>, pipeline: SharedPipeline) -> Self {
        Self {
            original,
            pipeline,
            last_outcome: None,
        }
    }

    /// Outcome of the most recent rewrite.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&RewriteOutcome> {
        self.last_outcome.as_ref()
    }

    /// Gives back the renderer this hook was installed over.
    #[must_use]
    pub fn into_original(self) -> Box<dyn Renderer> {
        self.original
    }
}

impl Renderer for HookedRenderer {
    fn set_data(&mut self, mut document: GraphDocument) {
        let outcome = match self.pipeline.read() {
            Ok(pipeline) => pipeline.rewrite(&mut document),
            Err(_) => {
                error!("pipeline lock poisoned, forwarding document unmodified");
                RewriteOutcome::PassedThrough {
                    reason: "pipeline lock poisoned".to_string(),
                }
            }
        };
        self.last_outcome = Some(outcome);
        self.original.set_data(document);
    }
}
