// SPDX-License-Identifier: MIT

//! Catalog loading smoke tests against the committed sample data.

mod common;

use common::viewport;
use zonemap::config::MapConfig;
use zonemap::models::FilterQuery;
use zonemap::services::PropertyCatalog;
use zonemap::MapState;

fn load_sample_catalog() -> PropertyCatalog {
    PropertyCatalog::load_from_file("data/sample_properties.json")
        .expect("Failed to load sample catalog - is data/ committed?")
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = load_sample_catalog();
    assert_eq!(catalog.len(), 7);

    let snapshot = catalog.snapshot();
    let positioned = snapshot.iter().filter(|p| p.has_position()).count();
    assert_eq!(positioned, 6, "one sample property awaits geocoding");

    // Ids must be unique or marker registry keys collide.
    let mut seen = std::collections::HashSet::new();
    for property in snapshot.iter() {
        assert!(seen.insert(&property.id), "Duplicate id: {}", property.id);
    }
}

#[test]
fn test_state_recompute_over_sample_data() {
    let state = MapState::new(MapConfig::default(), load_sample_catalog());

    // Central Madrid at street-level zoom.
    let madrid = viewport(40.5, 40.35, -3.6, -3.8, 17);
    let visible = state.recompute(&madrid, &FilterQuery::default());

    assert_eq!(visible.matched, 6);
    assert_eq!(visible.len(), 6);
    // Address sort is the default ordering.
    let addresses: Vec<&str> = visible
        .entries
        .iter()
        .map(|p| p.address.as_str())
        .collect();
    let mut sorted = addresses.clone();
    sorted.sort_unstable();
    assert_eq!(addresses, sorted);
}

#[test]
fn test_state_recompute_respects_drawn_zone() {
    let mut state = MapState::new(MapConfig::default(), load_sample_catalog());

    // A tight box around Gran Via 45 only.
    state.editor.begin_draw();
    state.editor.place_vertex(40.419, -3.707).unwrap();
    state.editor.place_vertex(40.419, -3.704).unwrap();
    state.editor.place_vertex(40.421, -3.704).unwrap();
    state.editor.place_vertex(40.421, -3.707).unwrap();
    state.editor.close_ring().expect("box closes");

    let madrid = viewport(40.5, 40.35, -3.6, -3.8, 17);
    let visible = state.recompute(&madrid, &FilterQuery::default());

    assert_eq!(visible.len(), 1);
    assert_eq!(visible.entries[0].id, "prop-002");
}
