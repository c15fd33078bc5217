// src/host/registry.rs
//! Attaches the render hook to graph views and detaches it on teardown.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::hook::{HookedRenderer, Renderer, SharedPipeline};
use crate::graph::GraphDocument;
use crate::pipeline::Pipeline;

enum RendererSlot {
    Plain(Box<dyn Renderer>),
    Hooked(HookedRenderer),
    Detached,
}

/// A host graph view and its current render callback.
pub struct GraphView {
    id: String,
    slot: RendererSlot,
    needs_reload: bool,
}

impl GraphView {
    pub fn new(id: impl Into<String>, renderer: impl Renderer + 'static) -> Self {
        Self {
            id: id.into(),
            slot: RendererSlot::Plain(Box::new(renderer)),
            needs_reload: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_hooked(&self) -> bool {
        matches!(self.slot, RendererSlot::Hooked(_))
    }

    /// Set when the view must re-render after its callback changed.
    #[must_use]
    pub fn needs_reload(&self) -> bool {
        self.needs_reload
    }

    /// Clears the reload flag once the host has re-rendered.
    pub fn mark_reloaded(&mut self) {
        self.needs_reload = false;
    }

    /// What the host calls whenever it has fresh graph data.
    pub fn set_data(&mut self, document: GraphDocument) {
        match &mut self.slot {
            RendererSlot::Plain(r) => r.set_data(document),
            RendererSlot::Hooked(h) => h.set_data(document),
            RendererSlot::Detached => warn!(view = %self.id, "view has no renderer"),
        }
    }

    fn attach(&mut self, pipeline: &SharedPipeline) -> bool {
        match std::mem::replace(&mut self.slot, RendererSlot::Detached) {
            RendererSlot::Plain(original) => {
                self.slot = RendererSlot::Hooked(HookedRenderer::new(original, Arc::clone(pipeline)));
                true
            }
            other => {
                self.slot = other;
                false
            }
        }
    }

    fn detach(&mut self) -> bool {
        match std::mem::replace(&mut self.slot, RendererSlot::Detached) {
            RendererSlot::Hooked(hook) => {
                self.slot = RendererSlot::Plain(hook.into_original());
                self.needs_reload = true;
                true
            }
            other => {
                self.slot = other;
                false
            }
        }
    }
}

/// Tracks which views carry the hook.
#[derive(Default)]
pub struct ViewRegistry {
    pipeline: SharedPipeline,
    hooked: BTreeSet<String>,
}

impl ViewRegistry {
    #[must_use]
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(RwLock::new(pipeline)),
            hooked: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn pipeline(&self) -> SharedPipeline {
        Arc::clone(&self.pipeline)
    }

    /// Ids of views currently hooked.
    #[must_use]
    pub fn hooked_views(&self) -> Vec<String> {
        self.hooked.iter().cloned().collect()
    }

    /// Hooks every view not hooked yet. Returns how many were attached.
    pub fn on_layout_change(&mut self, views: &mut [GraphView]) -> usize {
        let mut attached = 0;
        for view in views.iter_mut() {
            if view.attach(&self.pipeline) {
                debug!(view = %view.id, "render hook attached");
                self.hooked.insert(view.id.clone());
                attached += 1;
            }
        }
        attached
    }

    /// Restores original renderers and flags those views for reload.
    pub fn teardown(&mut self, views: &mut [GraphView]) -> usize {
        let mut restored = 0;
        for view in views.iter_mut() {
            if view.detach() {
                debug!(view = %view.id, "render hook detached");
                self.hooked.remove(&view.id);
                restored += 1;
            }
        }
        restored
    }

    /// Swaps pipeline configuration. Waits for any in-flight rewrite.
    pub fn update(&self, f: impl FnOnce(&mut Pipeline)) {
        let mut guard = self.pipeline.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
