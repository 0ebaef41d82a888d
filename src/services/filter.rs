// SPDX-License-Identifier: MIT

//! Viewport property filter: computes the set of properties to render.
//!
//! Pure function of its inputs; interactive callers invoke it through the
//! debounced trigger rather than on every input event. Stage order is
//! fixed and each stage narrows (or reorders) the previous stage's output:
//!
//! 1. zoom gate
//! 2. zone containment (short-circuits on zero matches)
//! 3. medium-zoom sampling
//! 4. floor-equality filter
//! 5. search (substring filter, or floor-token partition sort)
//! 6. sort
//! 7. viewport bounds
//! 8. cap

use crate::config::MapConfig;
use crate::models::{DisplayMode, FilterQuery, Property, SortKey, Viewport, VisibleSet, Zone};

/// Compute the visible set for one recomputation trigger.
pub fn visible_set(
    properties: &[Property],
    viewport: &Viewport,
    zone: &Zone,
    query: &FilterQuery,
    config: &MapConfig,
) -> VisibleSet {
    let zone_active = zone.is_testable();

    // Properties without a finite position never reach a geometric stage.
    let mut candidates: Vec<&Property> = properties.iter().filter(|p| p.has_position()).collect();

    // 1. Zoom gate. An active zone is an explicit narrowing and bypasses
    //    the gate; otherwise low zoom means too many candidates to render.
    if !zone_active && viewport.zoom < config.min_marker_zoom {
        tracing::debug!(zoom = viewport.zoom, "Below marker zoom, nothing rendered");
        return VisibleSet::default();
    }

    // 2. Zone containment. Zero matches short-circuits: the zone is the
    //    user's answer, not the viewport.
    if zone_active {
        candidates.retain(|p| {
            p.position()
                .is_some_and(|(lat, lng)| zone.contains(lat, lng))
        });
        if candidates.is_empty() {
            return VisibleSet::default();
        }
    }

    // 3. Medium-zoom sampling: a deterministic stride over the candidates
    //    gives sparse visual feedback until the user narrows further.
    if !zone_active && viewport.zoom < config.sample_zoom {
        let stride = (1.0 / config.sample_fraction).round().max(1.0) as usize;
        candidates = candidates
            .into_iter()
            .step_by(stride)
            .take(config.sample_cap)
            .collect();
    }

    // 4. Secondary attribute filter: exact floor equality.
    if let Some(floor) = query.floor.as_deref() {
        candidates.retain(|p| p.floor.as_deref() == Some(floor));
    }

    // 5. Search. Floor-token terms reorder instead of filtering: matches
    //    go to the front, everything else stays behind them. The partition
    //    is applied after the sort so it stays the primary ordering.
    let mut partition_needle = None;
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        match floor_needle(term) {
            Some(needle) => partition_needle = Some(needle),
            None => {
                let needle = term.to_lowercase();
                candidates.retain(|p| matches_search(p, &needle));
            }
        }
    }

    // 6. Sort (stable).
    match query.sort {
        SortKey::Address => candidates.sort_by(|a, b| a.address.cmp(&b.address)),
        SortKey::Floor => candidates.sort_by(|a, b| {
            a.floor
                .as_deref()
                .unwrap_or("")
                .cmp(b.floor.as_deref().unwrap_or(""))
        }),
        SortKey::Size => candidates.sort_by(|a, b| {
            b.size_m2
                .unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&a.size_m2.unwrap_or(f64::NEG_INFINITY))
        }),
    }

    if let Some(needle) = partition_needle {
        // Stable, so each partition keeps the sort order above.
        candidates.sort_by_key(|p| !floor_contains(p, &needle));
    }

    // "N of M" messaging wants the match count before the viewport
    // restriction and cap.
    let matched = candidates.len();

    // 7. Viewport bounds, unless the side panel is listing every match.
    if query.mode == DisplayMode::Markers {
        candidates.retain(|p| {
            p.position()
                .is_some_and(|(lat, lng)| viewport.bounds.contains(lat, lng))
        });
    }

    // 8. Cap: more results are expected (and wanted) inside a drawn zone.
    let cap = if zone_active {
        config.zone_cap
    } else {
        config.viewport_cap
    };
    candidates.truncate(cap);

    tracing::debug!(
        matched,
        rendered = candidates.len(),
        zone_active,
        "Visible set recomputed"
    );

    VisibleSet {
        entries: candidates.into_iter().cloned().collect(),
        matched,
    }
}

/// If `term` looks like a floor/level search ("planta 2", "floor 3", or a
/// bare token like "2A"), return the needle to match floor labels against.
fn floor_needle(term: &str) -> Option<String> {
    let lowered = term.to_lowercase();
    for keyword in ["planta", "floor"] {
        if let Some(rest) = lowered.strip_prefix(keyword) {
            return Some(rest.trim().to_string());
        }
    }
    if is_floor_token(&lowered) {
        return Some(lowered);
    }
    None
}

/// Bare floor token: one or more digits with at most one trailing letter.
fn is_floor_token(term: &str) -> bool {
    let digits: String = term.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return false;
    }
    let rest = &term[digits.len()..];
    rest.is_empty() || (rest.len() == 1 && rest.chars().all(|c| c.is_alphabetic()))
}

fn floor_contains(property: &Property, needle: &str) -> bool {
    property
        .floor
        .as_deref()
        .is_some_and(|f| f.to_lowercase().contains(needle))
}

fn matches_search(property: &Property, needle: &str) -> bool {
    let fields = [
        Some(property.address.as_str()),
        property.city.as_deref(),
        property.floor.as_deref(),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|f| f.to_lowercase().contains(needle))
}
