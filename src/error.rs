// SPDX-License-Identifier: MIT

//! Crate-level error type aggregating the module-local errors.

use crate::config::ConfigError;
use crate::models::ZoneError;
use crate::services::catalog::CatalogError;
use crate::services::geocode::GeocodeError;

/// Top-level error for map core operations.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Zone error: {0}")]
    Zone(#[from] ZoneError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Geocoding error: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for map core operations
pub type Result<T> = std::result::Result<T, MapError>;
