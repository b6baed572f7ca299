//! Benchmarks for edge rendering, one per transition law.

use std::hint::black_box;

use arbgen::{Edge, EdgeShape, Polarity, Primitive};
use criterion::{BenchmarkId, Criterion};

use crate::GRID_SIZES;

pub fn bench_edge(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/edge");

    for &size in GRID_SIZES {
        let t: Vec<f64> = (0..size).map(|i| i as f64 / size as f64).collect();
        let mut acc = vec![0.0; size];

        for (name, shape) in [
            // erfc per sample
            ("gaussian", EdgeShape::Gaussian),
            // exp per sample
            ("exponential", EdgeShape::Exponential),
            ("ramp", EdgeShape::Ramp),
            ("square", EdgeShape::Square),
        ] {
            let edge = Primitive::Edge(Polarity::Rising, Edge::new(shape, 0.1, 1.0));
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| edge.accumulate(black_box(&t), black_box(0.5), &mut acc))
            });
        }
    }

    group.finish();
}
