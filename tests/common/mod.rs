// SPDX-License-Identifier: MIT

use zonemap::models::{Bounds, Property, Viewport};

/// Build a positioned property with the given id/address/coordinates.
#[allow(dead_code)]
pub fn property(id: &str, address: &str, lat: f64, lng: f64) -> Property {
    Property {
        id: id.to_string(),
        address: address.to_string(),
        city: None,
        floor: None,
        size_m2: None,
        lat: Some(lat),
        lng: Some(lng),
    }
}

/// Build a property with a floor label.
#[allow(dead_code)]
pub fn property_on_floor(id: &str, address: &str, floor: &str, lat: f64, lng: f64) -> Property {
    Property {
        floor: Some(floor.to_string()),
        ..property(id, address, lat, lng)
    }
}

/// A viewport spanning the given bounds at the given zoom.
#[allow(dead_code)]
pub fn viewport(north: f64, south: f64, east: f64, west: f64, zoom: u8) -> Viewport {
    Viewport {
        bounds: Bounds {
            north,
            south,
            east,
            west,
        },
        zoom,
    }
}

/// A viewport comfortably containing the 0..10 lat/lng test grid.
#[allow(dead_code)]
pub fn wide_viewport(zoom: u8) -> Viewport {
    viewport(90.0, -90.0, 180.0, -180.0, zoom)
}
