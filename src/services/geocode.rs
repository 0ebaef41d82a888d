// SPDX-License-Identifier: MIT

//! Geocoding: address → coordinates, outside the synchronous filter path.
//!
//! Handles:
//! - Single lookups against a Nominatim-style HTTP service
//! - Result caching (the same address never hits the network twice)
//! - Sequential, throttled batch precision improvement with coarse
//!   stop-after-current-item cancellation

use crate::models::Property;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use geo::Coord;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Resolves a free-text address to a coordinate, or nothing.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    async fn resolve(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError>;
}

/// Nominatim-style HTTP geocoder with an in-memory result cache.
#[derive(Clone)]
pub struct HttpGeocoder {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<DashMap<String, Coord<f64>>>,
}

impl HttpGeocoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            cache: Arc::new(DashMap::new()),
        }
    }
}

impl Geocoder for HttpGeocoder {
    async fn resolve(&self, address: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        if let Some(hit) = self.cache.get(address) {
            return Ok(Some(*hit));
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let hits: Vec<GeocodeHit> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Malformed(e.to_string()))?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };
        let lat: f64 = hit
            .lat
            .parse()
            .map_err(|_| GeocodeError::Malformed(format!("bad latitude {:?}", hit.lat)))?;
        let lon: f64 = hit
            .lon
            .parse()
            .map_err(|_| GeocodeError::Malformed(format!("bad longitude {:?}", hit.lon)))?;

        let coord = Coord { x: lon, y: lat };
        self.cache.insert(address.to_string(), coord);
        Ok(Some(coord))
    }
}

/// One result row from the geocoding service.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

/// Coarse cancellation for a running batch: the batch finishes the item in
/// flight, then stops.
#[derive(Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Sequential batch geocoder.
///
/// Lookups are spaced at least `interval` apart to respect the external
/// service's usage policy. Individual failures are logged and skipped;
/// they surface only in the aggregate report.
pub struct BatchGeocoder<G> {
    geocoder: G,
    interval: Duration,
    cancel: CancelHandle,
}

impl<G: Geocoder> BatchGeocoder<G> {
    pub fn new(geocoder: G, interval: Duration) -> Self {
        Self {
            geocoder,
            interval,
            cancel: CancelHandle::default(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Fill in coordinates for every property that lacks a usable
    /// position. Runs over seconds-to-minutes for large selections.
    pub async fn improve_positions(&self, properties: &mut [Property]) -> GeocodeReport {
        let mut report = GeocodeReport::default();
        let mut ticker = tokio::time::interval(self.interval);

        for property in properties.iter_mut().filter(|p| !p.has_position()) {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            ticker.tick().await;
            report.attempted += 1;

            match self.geocoder.resolve(&property.address).await {
                Ok(Some(coord)) => {
                    property.lat = Some(coord.y);
                    property.lng = Some(coord.x);
                    report.resolved += 1;
                }
                Ok(None) => {
                    tracing::debug!(id = %property.id, address = %property.address, "No geocoding result");
                    report.unresolved += 1;
                }
                Err(e) => {
                    tracing::warn!(id = %property.id, error = %e, "Geocoding lookup failed");
                    report.failed += 1;
                }
            }
        }

        report.finished_at = Utc::now();
        tracing::info!(
            attempted = report.attempted,
            resolved = report.resolved,
            failed = report.failed,
            cancelled = report.cancelled,
            "Geocoding batch finished"
        );
        report
    }
}

/// Aggregate outcome of a batch run, reported to the user once at the end.
#[derive(Debug, Clone, Serialize)]
pub struct GeocodeReport {
    /// Lookups actually issued
    pub attempted: usize,
    /// Properties that gained a position
    pub resolved: usize,
    /// Lookups that returned no result
    pub unresolved: usize,
    /// Lookups that errored (network, bad response)
    pub failed: usize,
    /// Whether the batch was stopped early
    pub cancelled: bool,
    pub finished_at: DateTime<Utc>,
}

impl Default for GeocodeReport {
    fn default() -> Self {
        Self {
            attempted: 0,
            resolved: 0,
            unresolved: 0,
            failed: 0,
            cancelled: false,
            finished_at: Utc::now(),
        }
    }
}

/// Errors from geocoding lookups.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Request(String),

    #[error("Geocoding service returned status {0}")]
    Status(u16),

    #[error("Malformed geocoder response: {0}")]
    Malformed(String),
}
