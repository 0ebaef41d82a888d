// SPDX-License-Identifier: MIT

//! zonemap smoke entry point.
//!
//! Loads the configuration and a property catalog, runs one filter pass
//! over a viewport covering the whole catalog, and optionally runs the
//! geocoding batch (`GEOCODE=1`) to fill in missing positions.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zonemap::{
    models::{Bounds, FilterQuery, Viewport},
    services::{BatchGeocoder, HttpGeocoder},
    MapState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let catalog_path =
        std::env::var("CATALOG_PATH").unwrap_or_else(|_| "data/sample_properties.json".to_string());
    tracing::info!(path = %catalog_path, "Loading property catalog");

    let state = MapState::from_env(&catalog_path)?;
    tracing::info!(
        count = state.catalog.len(),
        viewport_cap = state.config.viewport_cap,
        zone_cap = state.config.zone_cap,
        "Property catalog loaded"
    );

    if std::env::var("GEOCODE").is_ok_and(|v| v == "1") {
        let geocoder = HttpGeocoder::new(state.config.geocoder_url.clone());
        let batch = BatchGeocoder::new(geocoder, state.config.geocode_interval());

        let mut properties = state.catalog.snapshot().as_ref().clone();
        let report = batch.improve_positions(&mut properties).await;
        state.catalog.replace_all(properties);

        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.attempted > 0 && report.resolved == 0 {
            return Err(anyhow::anyhow!(
                "geocoding batch resolved none of {} lookups",
                report.attempted
            )
            .into());
        }
    }

    let viewport = catalog_viewport(&state);
    let visible = state.recompute(&viewport, &FilterQuery::default());
    tracing::info!(
        matched = visible.matched,
        rendered = visible.len(),
        "Smoke filter pass complete"
    );
    println!("{}", serde_json::to_string_pretty(&visible)?);

    Ok(())
}

/// A viewport that covers every positioned property, at a zoom above the
/// marker gate.
fn catalog_viewport(state: &MapState) -> Viewport {
    let snapshot = state.catalog.snapshot();
    let positions: Vec<(f64, f64)> = snapshot.iter().filter_map(|p| p.position()).collect();

    let mut bounds = Bounds {
        north: 90.0,
        south: -90.0,
        east: 180.0,
        west: -180.0,
    };
    if !positions.is_empty() {
        bounds.north = positions.iter().map(|p| p.0).fold(f64::MIN, f64::max);
        bounds.south = positions.iter().map(|p| p.0).fold(f64::MAX, f64::min);
        bounds.east = positions.iter().map(|p| p.1).fold(f64::MIN, f64::max);
        bounds.west = positions.iter().map(|p| p.1).fold(f64::MAX, f64::min);
    }

    Viewport {
        bounds,
        zoom: state.config.sample_zoom,
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("zonemap=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
