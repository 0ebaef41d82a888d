// SPDX-License-Identifier: MIT

//! Filter query options and the derived visible set.

use crate::models::Property;
use serde::{Deserialize, Serialize};

/// Sort order for the visible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Lexicographic by street address
    #[default]
    Address,
    /// Lexicographic by floor label
    Floor,
    /// Descending by built surface
    Size,
}

/// How the result is being presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Markers on the map: restricted to the viewport bounds
    #[default]
    Markers,
    /// Side-panel listing of every match: viewport restriction skipped
    FullList,
}

/// User-controlled filter options, one snapshot per recomputation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Free-text search term
    #[serde(default)]
    pub search: Option<String>,
    /// Exact floor-equality filter
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub mode: DisplayMode,
}

/// The derived render set: ordered, capped, recomputed on every trigger.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VisibleSet {
    /// Properties to render, in display order
    pub entries: Vec<Property>,
    /// Match count before the viewport restriction and cap, for
    /// "showing N of M" messaging
    pub matched: usize,
}

impl VisibleSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
