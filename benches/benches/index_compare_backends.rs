// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use meridian_index::{Aabb2D, BoundingBox, FragmentId, Index, RTreeF64, SpatialIndex};

/// `n` x `n` fragments tiling the globe, each a little larger than its cell.
fn gen_world_grid(n: u32, overlap: f64) -> Vec<(BoundingBox, FragmentId)> {
    let cell_w = 360.0 / f64::from(n);
    let cell_h = 180.0 / f64::from(n);
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            let x0 = -180.0 + f64::from(x) * cell_w;
            let y0 = -90.0 + f64::from(y) * cell_h;
            out.push((
                Aabb2D::from_xywh(x0, y0, cell_w * overlap, cell_h * overlap),
                FragmentId(y * n + x),
            ));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Scattered country-sized fragments.
fn gen_random_fragments(count: u32, max_w: f64, max_h: f64) -> Vec<(BoundingBox, FragmentId)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| {
            let w = rng.next_f64() * max_w;
            let h = rng.next_f64() * max_h;
            let x0 = -180.0 + rng.next_f64() * (360.0 - w);
            let y0 = -90.0 + rng.next_f64() * (180.0 - h);
            (Aabb2D::from_xywh(x0, y0, w, h), FragmentId(i))
        })
        .collect()
}

/// Viewport-sized query boxes at a few zoom levels.
fn viewport_queries() -> Vec<BoundingBox> {
    vec![
        Aabb2D::new(-192.0, -95.0, 192.0, 95.0),
        Aabb2D::new(-20.0, 30.0, 40.0, 70.0),
        Aabb2D::new(10.0, 59.0, 11.5, 60.5),
    ]
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[32_u32, 64, 128] {
        let entries = gen_world_grid(n, 1.2);
        group.throughput(Throughput::Elements(u64::from(n * n)));
        group.bench_function(format!("rtree_bulk_n{n}"), |b| {
            b.iter(|| black_box(SpatialIndex::bulk(&entries)));
        });
        group.bench_function(format!("rtree_bulk_arity16_n{n}"), |b| {
            let pairs: Vec<_> = entries
                .iter()
                .enumerate()
                .map(|(i, (bbox, _))| (i, *bbox))
                .collect();
            b.iter(|| black_box(RTreeF64::bulk_build_with_arity(&pairs, 16)));
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let queries = viewport_queries();
    for (name, entries) in [
        ("grid_n128", gen_world_grid(128, 1.2)),
        ("random_20k", gen_random_fragments(20_000, 8.0, 5.0)),
    ] {
        let tree = SpatialIndex::bulk(&entries);
        let flat: Index<f64, FragmentId> = Index::bulk(&entries);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("rtree_{name}"), |b| {
            b.iter(|| {
                let hits: usize = queries
                    .iter()
                    .map(|q| tree.query_rect(*q).map(|it| it.count()).unwrap_or(0))
                    .sum();
                black_box(hits)
            });
        });
        group.bench_function(format!("flatvec_{name}"), |b| {
            b.iter(|| {
                let hits: usize = queries
                    .iter()
                    .map(|q| flat.query_rect(*q).map(|it| it.count()).unwrap_or(0))
                    .sum();
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
