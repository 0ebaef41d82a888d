// SPDX-License-Identifier: MIT

//! zonemap: zone geofencing and viewport property filtering
//!
//! This crate is the map core of a real-estate dashboard: it decides which
//! properties render as markers given the current viewport, an optional
//! hand-drawn zone, and the active search/sort options.

pub mod config;
pub mod error;
pub mod markers;
pub mod models;
pub mod services;

use config::MapConfig;
use models::{FilterQuery, Viewport, VisibleSet, Zone};
use services::{PropertyCatalog, ZoneEditor};

/// Shared map state: configuration, the current property snapshot, and the
/// zone editor.
#[derive(Default)]
pub struct MapState {
    pub config: MapConfig,
    pub catalog: PropertyCatalog,
    pub editor: ZoneEditor,
}

impl MapState {
    pub fn new(config: MapConfig, catalog: PropertyCatalog) -> Self {
        Self {
            config,
            catalog,
            editor: ZoneEditor::new(),
        }
    }

    /// Load configuration from the environment and the catalog from a
    /// JSON file.
    pub fn from_env(catalog_path: &str) -> error::Result<Self> {
        let config = MapConfig::from_env()?;
        let catalog = PropertyCatalog::load_from_file(catalog_path)?;
        Ok(Self::new(config, catalog))
    }

    /// Run one recomputation over the current snapshot and active zone.
    pub fn recompute(&self, viewport: &Viewport, query: &FilterQuery) -> VisibleSet {
        let snapshot = self.catalog.snapshot();
        let empty = Zone::default();
        let zone = self.editor.active_zone().unwrap_or(&empty);
        services::visible_set(&snapshot, viewport, zone, query, &self.config)
    }
}
