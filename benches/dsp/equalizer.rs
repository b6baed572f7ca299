//! Benchmarks for the DAC pre-equalizer.

use std::hint::black_box;

use arbgen::Equalizer;
use criterion::{BenchmarkId, Criterion};

use crate::GRID_SIZES;

pub fn bench_equalizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/equalizer");

    // Design cost grows with the normal-equation solve
    for taps in [7usize, 31, 63] {
        group.bench_with_input(BenchmarkId::new("design", taps), &taps, |b, &taps| {
            b.iter(|| Equalizer::design(black_box(taps)))
        });
    }

    let eq = Equalizer::design(31).expect("31 taps is a valid design");
    for &size in GRID_SIZES {
        let signal: Vec<f64> = (0..size).map(|i| ((i / 40) % 2) as f64).collect();
        group.bench_with_input(BenchmarkId::new("filtfilt", size), &size, |b, _| {
            b.iter(|| eq.apply(black_box(&signal)))
        });
    }

    group.finish();
}
