// SPDX-License-Identifier: MIT

//! Zone model: a single hand-drawn polygon and its geometry tests.

use geo::algorithm::line_intersection::line_intersection;
use geo::{Coord, Line};

/// A user-drawn zone: an ordered vertex ring, `x = lng`, `y = lat`.
///
/// An empty ring means "no active zone". Rings with fewer than three
/// vertices cannot be containment-tested and behave like an empty ring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Zone {
    vertices: Vec<Coord<f64>>,
}

impl Zone {
    /// Build a zone from `(lat, lng)` vertex pairs.
    pub fn from_lat_lng(points: &[(f64, f64)]) -> Self {
        Self {
            vertices: points
                .iter()
                .map(|&(lat, lng)| Coord { x: lng, y: lat })
                .collect(),
        }
    }

    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the ring has enough vertices for containment testing.
    pub fn is_testable(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Ray-casting point-in-polygon test.
    ///
    /// A horizontal ray is cast from the point; `inside` flips on every
    /// edge crossing. Boundary semantics are half-open: with the strict
    /// `>` comparisons, the north/east boundary of an axis-aligned ring
    /// tests outside while the south/west boundary tests inside, so
    /// adjacent zones never double-count a shared border point.
    ///
    /// Rings below three vertices apply no containment and accept every
    /// point, so an empty zone is a pass-through rather than a wall.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        if !self.is_testable() {
            return true;
        }
        let (x, y) = (lng, lat);
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.vertices[i].x, self.vertices[i].y);
            let (xj, yj) = (self.vertices[j].x, self.vertices[j].y);
            if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Whether any two non-adjacent ring edges intersect.
    ///
    /// Adjacent edges share a vertex and are skipped; any contact between
    /// the remaining pairs (proper crossing, endpoint touch, or collinear
    /// overlap) counts as a self-intersection.
    pub fn is_self_intersecting(&self) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return false;
        }
        let edge = |i: usize| Line::new(self.vertices[i], self.vertices[(i + 1) % n]);
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if line_intersection(edge(i), edge(j)).is_some() {
                    return true;
                }
            }
        }
        false
    }

    /// Convert the zone to a GeoJSON Polygon geometry (closed ring,
    /// positions as `[lng, lat]`) for the persistence collaborator.
    pub fn to_geojson(&self) -> Result<geojson::Geometry, ZoneError> {
        if !self.is_testable() {
            return Err(ZoneError::TooFewVertices(self.vertices.len()));
        }
        let mut ring: Vec<Vec<f64>> = self.vertices.iter().map(|c| vec![c.x, c.y]).collect();
        // GeoJSON rings repeat the first position to close
        ring.push(ring[0].clone());
        Ok(geojson::Geometry::new(geojson::Value::Polygon(vec![ring])))
    }

    /// Parse a zone from a GeoJSON string (Feature or bare Geometry with a
    /// Polygon value). Only the exterior ring is kept; the closing
    /// duplicate vertex is dropped.
    pub fn from_geojson(json_data: &str) -> Result<Self, ZoneError> {
        let geojson: geojson::GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| ZoneError::ParseError(e.to_string()))?;

        let geometry = match geojson {
            geojson::GeoJson::Geometry(g) => g,
            geojson::GeoJson::Feature(f) => f.geometry.ok_or(ZoneError::UnsupportedGeometry)?,
            geojson::GeoJson::FeatureCollection(_) => return Err(ZoneError::UnsupportedGeometry),
        };

        let rings = match geometry.value {
            geojson::Value::Polygon(rings) => rings,
            _ => return Err(ZoneError::UnsupportedGeometry),
        };
        let exterior = rings.first().ok_or(ZoneError::UnsupportedGeometry)?;

        let mut vertices: Vec<Coord<f64>> = exterior
            .iter()
            .filter(|pos| pos.len() >= 2)
            .map(|pos| Coord {
                x: pos[0],
                y: pos[1],
            })
            .collect();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(ZoneError::TooFewVertices(vertices.len()));
        }
        Ok(Self { vertices })
    }
}

/// Errors from zone parsing and conversion.
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Unsupported geometry type (expected Polygon)")]
    UnsupportedGeometry,

    #[error("A zone needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}
