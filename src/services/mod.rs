// SPDX-License-Identifier: MIT

//! Services module - the map core's behavior.

pub mod catalog;
pub mod editor;
pub mod filter;
pub mod geocode;
pub mod trigger;

pub use catalog::PropertyCatalog;
pub use editor::{EditorError, EditorState, ZoneEditor, ZoneEvent};
pub use filter::visible_set;
pub use geocode::{BatchGeocoder, CancelHandle, GeocodeReport, Geocoder, HttpGeocoder};
pub use trigger::DebouncedTrigger;
