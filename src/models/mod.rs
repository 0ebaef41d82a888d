// SPDX-License-Identifier: MIT

//! Data models for the map core.

pub mod property;
pub mod viewport;
pub mod visible;
pub mod zone;

pub use property::Property;
pub use viewport::{Bounds, Viewport};
pub use visible::{DisplayMode, FilterQuery, SortKey, VisibleSet};
pub use zone::{Zone, ZoneError};
