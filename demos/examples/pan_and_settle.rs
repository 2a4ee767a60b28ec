// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan across a small snapshot-backed map and watch the visible set widen
//! during the move and settle afterwards.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p meridian_demos --example pan_and_settle`

use std::sync::Arc;
use std::time::Duration;

use kurbo::Vec2;
use meridian_index::{SnapshotNode, SnapshotOptions};
use meridian_timing::ManualClock;
use meridian_visibility::{
    FragmentTable, MapLayers, ResolverConfig, ViewportState, VisibilityResolver,
};
use tracing_subscriber::EnvFilter;

const AREAS: &str = r#"{
  "children": [
    {
      "children": [
        { "minX": -10, "minY": 35, "maxX": 3, "maxY": 44, "id": "0" },
        { "minX": -5, "minY": 42, "maxX": 8, "maxY": 51, "id": "1" },
        { "minX": 5, "minY": 47, "maxX": 15, "maxY": 55, "id": "2" }
      ],
      "height": 1, "leaf": true,
      "minX": -10, "minY": 35, "maxX": 15, "maxY": 55
    },
    {
      "children": [
        { "minX": 4, "minY": 57, "maxX": 31, "maxY": 71, "id": "3" },
        { "minX": 20, "minY": 59, "maxX": 32, "maxY": 70, "id": "4" },
        { "minX": 30, "minY": 41, "maxX": 180, "maxY": 78, "id": "5" }
      ],
      "height": 1, "leaf": true,
      "minX": 4, "minY": 41, "maxX": 180, "maxY": 78
    }
  ],
  "height": 2, "leaf": false,
  "minX": -10, "minY": 35, "maxX": 180, "maxY": 78
}"#;

const LINES: &str = r#"{
  "children": [
    { "minX": 11, "minY": 58, "maxX": 13, "maxY": 69, "id": 0 },
    { "minX": 20, "minY": 60, "maxX": 30, "maxY": 70, "id": 1 }
  ],
  "height": 1, "leaf": true,
  "minX": 11, "minY": 58, "maxX": 30, "maxY": 70
}"#;

const COUNTRIES: [&str; 6] = ["Spain", "France", "Germany", "Norway", "Finland", "Russia"];
const BORDERS: [&str; 2] = ["Norway/Sweden", "Finland/Russia"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let areas: SnapshotNode = serde_json::from_str(AREAS)?;
    let lines: SnapshotNode = serde_json::from_str(LINES)?;
    let layers = Arc::new(MapLayers::from_snapshots(
        &areas,
        &lines,
        &SnapshotOptions::default(),
    )?);
    tracing::info!(
        areas = layers.areas.len(),
        lines = layers.lines.len(),
        "map layers loaded"
    );
    let countries: FragmentTable<&str> = COUNTRIES.into_iter().collect();
    let borders: FragmentTable<&str> = BORDERS.into_iter().collect();

    let clock = ManualClock::new();
    let mut resolver = VisibilityResolver::new(layers, ResolverConfig::default(), &clock)?;

    let paris = ViewportState::new(800.0, 600.0)
        .with_center((2.35, 48.86).into())
        .with_zoom(8.0);
    let print = |label: &str, r: &VisibilityResolver<&ManualClock>| {
        let result = r.current_result();
        let a: Vec<_> = countries.resolve(&result.areas).map(|(_, n)| *n).collect();
        let l: Vec<_> = borders.resolve(&result.lines).map(|(_, n)| *n).collect();
        println!(
            "{label:>22}: history={} areas={a:?} lines={l:?}",
            r.history().len()
        );
    };

    resolver.update(&paris)?;
    print("over Paris", &resolver);

    // Pan north-east in three quick steps, 16 ms apart.
    for step in 1..=3 {
        clock.advance(Duration::from_millis(16));
        let offset = Vec2::new(f64::from(step) * 80.0, f64::from(step) * -120.0);
        resolver.update(&paris.with_offset(offset))?;
        print(&format!("pan step {step}"), &resolver);
    }

    if let Some(deadline) = resolver.next_deadline() {
        clock.set(deadline);
    }
    resolver.advance()?;
    print("settled", &resolver);

    if let Some(frame) = resolver.frame() {
        println!("centered on {} at zoom {}", frame.zoom_center, frame.zoom);
    }
    resolver.dispose();
    Ok(())
}
