//! A Gaussian pulse channel from builder to quantized codes.

use std::hint::black_box;

use arbgen::{io::export, Arbgen, ArbgenConfig, EdgeShape, Pulse};
use criterion::{BenchmarkId, Criterion};

use crate::GRID_SIZES;

fn pulse_generator(pre_equalize: bool) -> Arbgen {
    let config = ArbgenConfig::default().with_pre_equalize(pre_equalize);
    let mut arb = Arbgen::new(config).expect("default config is valid");
    arb.channel(0)
        .and_then(|mut ch| {
            ch.value(0.0)
                .delay(200e-9)?
                .pos_pulse(Pulse::new(EdgeShape::Gaussian, 100e-9, 100e-9, 400e-9, 1.0))?
                .delay(200e-9)?;
            Ok(())
        })
        .expect("pulse channel builds");
    arb
}

pub fn bench_pulse(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pulse");
    let period = 800e-9;

    for &size in GRID_SIZES {
        let sample_rate = size as f64 / period;

        let plain = pulse_generator(false);
        group.bench_with_input(BenchmarkId::new("digitize", size), &size, |b, _| {
            b.iter(|| plain.digitize(0, black_box(sample_rate), 1))
        });

        let equalized = pulse_generator(true);
        group.bench_with_input(BenchmarkId::new("digitize_eq", size), &size, |b, _| {
            b.iter(|| equalized.digitize(0, black_box(sample_rate), 1))
        });

        let samples = plain
            .digitize(0, sample_rate, 1)
            .expect("pulse channel digitizes")
            .samples;
        group.bench_with_input(BenchmarkId::new("quantize", size), &size, |b, _| {
            b.iter(|| export::quantize(black_box(&samples)))
        });
    }

    group.finish();
}
