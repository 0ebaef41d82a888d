// SPDX-License-Identifier: MIT

//! Marker handle registry.
//!
//! The rendering layer needs to reach a live on-screen marker by property
//! id (to open its popup from the side-panel list). This is an explicit,
//! owned map scoped to one map view's lifetime, torn down with the view.

use std::collections::HashMap;

/// Owned registry from property id to a live marker handle.
#[derive(Debug)]
pub struct MarkerRegistry<H> {
    handles: HashMap<String, H>,
}

impl<H> Default for MarkerRegistry<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> MarkerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle, returning the one it replaced, if any.
    pub fn insert(&mut self, id: impl Into<String>, handle: H) -> Option<H> {
        self.handles.insert(id.into(), handle)
    }

    pub fn handle(&self, id: &str) -> Option<&H> {
        self.handles.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<H> {
        self.handles.remove(id)
    }

    /// Drop handles for markers no longer rendered.
    pub fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        self.handles.retain(|id, _| keep(id));
    }

    /// Tear down the registry when the map view unmounts.
    pub fn teardown(&mut self) {
        self.handles.clear();
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
