// SPDX-License-Identifier: MIT

//! Property catalog: loading and snapshot management.
//!
//! The catalog is the boundary to the data-store collaborator. Whatever
//! fetched the property list (REST call, file, server-rendered prop), it
//! lands here as a wholesale snapshot; the filter borrows that snapshot
//! read-only for the duration of one recomputation.

use crate::models::Property;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Holds the current immutable property snapshot.
///
/// Snapshots are replaced wholesale, never mutated in place: a pending
/// recomputation keeps the `Arc` it was handed even if newer data arrives
/// mid-pass.
#[derive(Default, Clone)]
pub struct PropertyCatalog {
    snapshot: Arc<RwLock<Arc<Vec<Property>>>>,
}

impl PropertyCatalog {
    /// Load a catalog from a JSON file containing a property array.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load a catalog from a JSON property array.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let properties: Vec<Property> =
            serde_json::from_str(json_data).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let unpositioned = properties.iter().filter(|p| !p.has_position()).count();
        tracing::info!(
            count = properties.len(),
            unpositioned,
            "Loaded property catalog"
        );

        let catalog = Self::default();
        catalog.replace_all(properties);
        Ok(catalog)
    }

    /// Load a catalog from a GeoJSON FeatureCollection of Point features.
    ///
    /// Feature properties map onto the property fields (`id`, `address`,
    /// `city`, `floor`, `size_m2`); features without a Point geometry are
    /// kept without a position so the geocoder can fill them in later.
    pub fn load_from_geojson(json_data: &str) -> Result<Self, CatalogError> {
        let geojson: geojson::GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| CatalogError::ParseError(e.to_string()))?;

        let geojson::GeoJson::FeatureCollection(collection) = geojson else {
            return Err(CatalogError::ParseError(
                "expected a FeatureCollection".to_string(),
            ));
        };

        let mut properties = Vec::new();
        for feature in collection.features {
            let id = feature
                .property("id")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let Some(id) = id else {
                tracing::warn!("Skipping feature without an id property");
                continue;
            };

            let address = feature
                .property("address")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let city = feature
                .property("city")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let floor = feature
                .property("floor")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let size_m2 = feature.property("size_m2").and_then(|v| v.as_f64());

            let (lat, lng) = match feature.geometry.as_ref().map(|g| &g.value) {
                Some(geojson::Value::Point(pos)) if pos.len() >= 2 => {
                    (Some(pos[1]), Some(pos[0]))
                }
                _ => (None, None),
            };

            properties.push(Property {
                id,
                address,
                city,
                floor,
                size_m2,
                lat,
                lng,
            });
        }

        let unpositioned = properties.iter().filter(|p| !p.has_position()).count();
        tracing::info!(
            count = properties.len(),
            unpositioned,
            "Loaded property catalog from GeoJSON"
        );

        let catalog = Self::default();
        catalog.replace_all(properties);
        Ok(catalog)
    }

    /// Current snapshot; cheap to clone, safe to hold across a
    /// recomputation.
    pub fn snapshot(&self) -> Arc<Vec<Property>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Swap in a new snapshot wholesale.
    pub fn replace_all(&self, properties: Vec<Property>) {
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(properties);
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse catalog: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_json_array() {
        let catalog = PropertyCatalog::load_from_json(
            r#"[
                {"id": "a", "address": "Calle Uno 1", "lat": 40.1, "lng": -3.6},
                {"id": "b", "address": "Calle Dos 2"}
            ]"#,
        )
        .expect("valid catalog JSON");

        assert_eq!(catalog.len(), 2);
        let snapshot = catalog.snapshot();
        assert!(snapshot[0].has_position());
        assert!(!snapshot[1].has_position());
    }

    #[test]
    fn test_load_from_geojson_points() {
        let catalog = PropertyCatalog::load_from_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [-3.7, 40.4]},
                        "properties": {"id": "p1", "address": "Gran Via 1", "floor": "2A"}
                    },
                    {
                        "type": "Feature",
                        "geometry": null,
                        "properties": {"id": "p2", "address": "Gran Via 2"}
                    },
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [-3.7, 40.5]},
                        "properties": {"address": "no id, skipped"}
                    }
                ]
            }"#,
        )
        .expect("valid GeoJSON");

        assert_eq!(catalog.len(), 2);
        let snapshot = catalog.snapshot();
        assert_eq!(snapshot[0].id, "p1");
        assert_eq!(snapshot[0].position(), Some((40.4, -3.7)));
        assert_eq!(snapshot[0].floor.as_deref(), Some("2A"));
        assert!(!snapshot[1].has_position());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(PropertyCatalog::load_from_json("{not json").is_err());
    }

    #[test]
    fn test_replace_all_swaps_wholesale() {
        let catalog = PropertyCatalog::default();
        assert!(catalog.is_empty());

        // A recomputation holding the old snapshot keeps seeing it.
        let before = catalog.snapshot();
        catalog.replace_all(vec![Property {
            id: "x".to_string(),
            address: "Calle Nueva 9".to_string(),
            city: None,
            floor: None,
            size_m2: None,
            lat: Some(40.0),
            lng: Some(-3.0),
        }]);

        assert_eq!(before.len(), 0);
        assert_eq!(catalog.len(), 1);
    }
}
