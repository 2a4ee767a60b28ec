// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;
use std::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Size, Vec2};
use meridian_index::{Aabb2D, FragmentId, SpatialIndex};
use meridian_projection::{GeoPoint, Projection, ProjectionConfig};
use meridian_timing::ManualClock;
use meridian_visibility::calculator::viewport_bounding_box;
use meridian_visibility::{MapLayers, ResolverConfig, ViewportState, VisibilityResolver};

fn world_layers(n: u32) -> Arc<MapLayers> {
    let cell_w = 360.0 / f64::from(n);
    let cell_h = 180.0 / f64::from(n);
    let mut areas = Vec::new();
    let mut lines = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let x0 = -180.0 + f64::from(x) * cell_w;
            let y0 = -90.0 + f64::from(y) * cell_h;
            let id = FragmentId(y * n + x);
            areas.push((Aabb2D::from_xywh(x0, y0, cell_w, cell_h), id));
            lines.push((Aabb2D::from_xywh(x0, y0, cell_w, 0.0), id));
        }
    }
    Arc::new(MapLayers::new(
        SpatialIndex::bulk(&areas),
        SpatialIndex::bulk(&lines),
    ))
}

fn bench_bounding_box(c: &mut Criterion) {
    let projection =
        Projection::new(&ProjectionConfig::default(), Size::new(1280.0, 720.0)).unwrap();
    c.bench_function("viewport_bounding_box", |b| {
        b.iter(|| {
            black_box(viewport_bounding_box(
                black_box(GeoPoint::new(10.75, 59.91)),
                1280.0,
                720.0,
                &projection,
                black_box(6.0),
            ))
        });
    });
}

fn bench_pan_sequence(c: &mut Criterion) {
    let layers = world_layers(128);
    let home = ViewportState::new(1280.0, 720.0)
        .with_center(GeoPoint::new(10.75, 59.91))
        .with_zoom(4.0);
    let mut group = c.benchmark_group("resolver");
    group.bench_function("pan_10_steps_then_settle", |b| {
        b.iter_batched(
            ManualClock::new,
            |clock| {
                let mut r =
                    VisibilityResolver::new(Arc::clone(&layers), ResolverConfig::default(), &clock)
                        .unwrap();
                for step in 0..10 {
                    let state = home.with_offset(Vec2::new(f64::from(step) * 25.0, 0.0));
                    black_box(r.update(&state).unwrap().len());
                    clock.advance(Duration::from_millis(16));
                }
                clock.advance(Duration::from_millis(2_000));
                black_box(r.advance().unwrap());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("unchanged_update", |b| {
        let clock = ManualClock::new();
        let mut r =
            VisibilityResolver::new(Arc::clone(&layers), ResolverConfig::default(), &clock)
                .unwrap();
        r.update(&home).unwrap();
        b.iter(|| black_box(r.update(black_box(&home)).unwrap().len()));
    });
    group.finish();
}

criterion_group!(benches, bench_bounding_box, bench_pan_sequence);
criterion_main!(benches);
