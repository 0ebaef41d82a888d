// SPDX-License-Identifier: MIT

//! Map core configuration loaded from environment variables.
//!
//! Every tunable the filter pipeline uses (zoom thresholds, sampling,
//! caps, debounce window, geocoder endpoint) lives here rather than as a
//! constant in the code that applies it.

use std::env;
use std::time::Duration;

/// Tunables for the map core, loaded once at startup.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Below this zoom, with no active zone, no markers render at all
    pub min_marker_zoom: u8,
    /// Below this zoom (and above `min_marker_zoom`), candidates are
    /// stride-sampled instead of fully rendered
    pub sample_zoom: u8,
    /// Fraction of candidates kept by the medium-zoom sample
    pub sample_fraction: f64,
    /// Hard ceiling on the medium-zoom sample size
    pub sample_cap: usize,
    /// Marker cap when filtering by viewport only
    pub viewport_cap: usize,
    /// Marker cap when a zone is active
    pub zone_cap: usize,
    /// Quiescence window for coalescing recomputation triggers
    pub debounce_ms: u64,
    /// Minimum spacing between geocoding lookups
    pub geocode_interval_ms: u64,
    /// Base URL of the Nominatim-style geocoding service
    pub geocoder_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_marker_zoom: 14,
            sample_zoom: 16,
            sample_fraction: 0.05,
            sample_cap: 300,
            viewport_cap: 300,
            zone_cap: 1000,
            debounce_ms: 300,
            geocode_interval_ms: 1000,
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
        }
    }
}

impl MapConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        let config = Self {
            min_marker_zoom: parse_var("MIN_MARKER_ZOOM", defaults.min_marker_zoom),
            sample_zoom: parse_var("SAMPLE_ZOOM", defaults.sample_zoom),
            sample_fraction: parse_var("SAMPLE_FRACTION", defaults.sample_fraction),
            sample_cap: parse_var("SAMPLE_CAP", defaults.sample_cap),
            viewport_cap: parse_var("VIEWPORT_CAP", defaults.viewport_cap),
            zone_cap: parse_var("ZONE_CAP", defaults.zone_cap),
            debounce_ms: parse_var("DEBOUNCE_MS", defaults.debounce_ms),
            geocode_interval_ms: parse_var("GEOCODE_INTERVAL_MS", defaults.geocode_interval_ms),
            geocoder_url: env::var("GEOCODER_URL").unwrap_or(defaults.geocoder_url),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_fraction > 0.0 && self.sample_fraction <= 1.0) {
            return Err(ConfigError::Invalid(
                "SAMPLE_FRACTION must be in (0, 1]".to_string(),
            ));
        }
        if self.sample_zoom < self.min_marker_zoom {
            return Err(ConfigError::Invalid(
                "SAMPLE_ZOOM must not be below MIN_MARKER_ZOOM".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn geocode_interval(&self) -> Duration {
        Duration::from_millis(self.geocode_interval_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.zone_cap > config.viewport_cap);
        assert_eq!(config.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_from_env_overrides() {
        env::set_var("VIEWPORT_CAP", "50");
        env::set_var("MIN_MARKER_ZOOM", "12");

        let config = MapConfig::from_env().expect("Config should load");
        assert_eq!(config.viewport_cap, 50);
        assert_eq!(config.min_marker_zoom, 12);

        env::remove_var("VIEWPORT_CAP");
        env::remove_var("MIN_MARKER_ZOOM");
    }

    #[test]
    fn test_malformed_value_falls_back_to_default() {
        env::set_var("ZONE_CAP", "not-a-number");
        let config = MapConfig::from_env().expect("Config should load");
        assert_eq!(config.zone_cap, 1000);
        env::remove_var("ZONE_CAP");
    }
}
