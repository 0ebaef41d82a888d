use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zonemap::config::MapConfig;
use zonemap::models::{Bounds, FilterQuery, Property, Viewport, Zone};
use zonemap::services::visible_set;

/// 10,000 properties on a city-sized grid.
fn city_grid() -> Vec<Property> {
    let mut properties = Vec::with_capacity(10_000);
    for i in 0..100 {
        for j in 0..100 {
            properties.push(Property {
                id: format!("p-{i:03}-{j:03}"),
                address: format!("Calle {i:03} num {j:03}"),
                city: Some("Madrid".to_string()),
                floor: Some(format!("{}", j % 9)),
                size_m2: Some(40.0 + (i * j) as f64 % 160.0),
                lat: Some(40.0 + i as f64 * 0.01),
                lng: Some(-4.0 + j as f64 * 0.01),
            });
        }
    }
    properties
}

/// A jagged 20-vertex star so the containment test walks a realistic ring.
fn star_zone() -> Zone {
    let mut points = Vec::new();
    for k in 0..20 {
        let angle = k as f64 * std::f64::consts::TAU / 20.0;
        let radius = if k % 2 == 0 { 0.4 } else { 0.2 };
        points.push((40.5 + radius * angle.sin(), -3.5 + radius * angle.cos()));
    }
    Zone::from_lat_lng(&points)
}

fn benchmark_visible_set(c: &mut Criterion) {
    let properties = city_grid();
    let config = MapConfig::default();
    let zone = star_zone();
    let far_zone = Zone::from_lat_lng(&[(10.0, 10.0), (10.0, 11.0), (11.0, 11.0), (11.0, 10.0)]);

    let viewport = Viewport {
        bounds: Bounds {
            north: 41.0,
            south: 40.0,
            east: -3.0,
            west: -4.0,
        },
        zoom: 18,
    };
    let query = FilterQuery::default();

    let mut group = c.benchmark_group("visible_set");

    group.bench_function("zone_over_city", |b| {
        b.iter(|| {
            visible_set(
                black_box(&properties),
                black_box(&viewport),
                black_box(&zone),
                &query,
                &config,
            )
        })
    });

    group.bench_function("zone_far_away", |b| {
        b.iter(|| {
            visible_set(
                black_box(&properties),
                black_box(&viewport),
                black_box(&far_zone),
                &query,
                &config,
            )
        })
    });

    group.bench_function("viewport_only", |b| {
        b.iter(|| {
            visible_set(
                black_box(&properties),
                black_box(&viewport),
                black_box(&Zone::default()),
                &query,
                &config,
            )
        })
    });

    group.finish();
}

fn benchmark_containment(c: &mut Criterion) {
    let zone = star_zone();

    c.bench_function("point_in_zone", |b| {
        b.iter(|| black_box(&zone).contains(black_box(40.6), black_box(-3.4)))
    });
}

criterion_group!(benches, benchmark_visible_set, benchmark_containment);
criterion_main!(benches);
