// SPDX-License-Identifier: MIT

//! Map viewport: visible bounds plus zoom level.

use geo::{Coord, Intersects, Rect};
use serde::{Deserialize, Serialize};

/// Geographic bounding box of the visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Inclusive point test: positions on the edge of the viewport still
    /// render.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        let rect = Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        );
        rect.intersects(&Coord { x: lng, y: lat })
    }
}

/// Current map viewport. Every pan/zoom end produces a new value and is a
/// recomputation trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: Bounds,
    pub zoom: u8,
}
