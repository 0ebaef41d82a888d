// SPDX-License-Identifier: MIT

//! Property model as supplied by the data-store collaborator.

use serde::{Deserialize, Serialize};

/// A listable real-estate unit with an optional map position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Unique property identifier (also used as marker key)
    pub id: String,
    /// Street address, searchable and used for lexicographic sort
    pub address: String,
    /// City / municipality
    #[serde(default)]
    pub city: Option<String>,
    /// Floor label as entered ("2A", "bajo", "3")
    #[serde(default)]
    pub floor: Option<String>,
    /// Built surface in square meters
    #[serde(default)]
    pub size_m2: Option<f64>,
    /// Latitude, WGS84; missing until geocoded
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude, WGS84; missing until geocoded
    #[serde(default)]
    pub lng: Option<f64>,
}

impl Property {
    /// Whether this property carries a finite position and can take part
    /// in any geometric stage.
    pub fn has_position(&self) -> bool {
        matches!((self.lat, self.lng), (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite())
    }

    /// Position as `(lat, lng)`, only when finite.
    pub fn position(&self) -> Option<(f64, f64)> {
        if self.has_position() {
            Some((self.lat.unwrap_or_default(), self.lng.unwrap_or_default()))
        } else {
            None
        }
    }
}
