use log::debug;

use crate::engine::Arbgen;
use crate::error::{require_positive, ArbError, Result};
use crate::GUARD_CYCLES;

/*
Digitization
============

  1. resolve the period P and the sample count N = ⌊P · fs⌋
  2. build one cycle of sample times over [0, P)
  3. render the channel on that grid (superposition of all primitives)
  4. tile the cycle `cycles + 2` times; the extra two are guard cycles
  5. optionally pre-equalize the whole tiled signal (zero-phase)
  6. keep the middle `cycles` repetitions, times rebased to start at 0

       guard      requested window            guard
    |--------|--------|--------|--------|--------|
    0        N                  (1+cycles)·N

The guards give the equalizer real neighbouring cycles to settle on, so the
window sees the periodic steady state rather than a filter start-up
transient.
*/

// Slack for periods assembled from decimal durations, e.g. 2e-7 + 4e-7 + 2e-7
const SAMPLE_COUNT_TOLERANCE: f64 = 1e-9;

/// Sample instants of one cycle.
///
/// Half-open: `n` points spaced `period / n` apart starting at 0, so the
/// last sample sits one step before `period` and tiled cycles join with a
/// uniform step.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    period: f64,
    times: Vec<f64>,
}

impl SampleGrid {
    pub fn new(period: f64, sample_rate: f64) -> Result<Self> {
        require_positive("period", period)?;
        require_positive("sample rate", sample_rate)?;

        let exact = period * sample_rate;
        let n = (exact * (1.0 + SAMPLE_COUNT_TOLERANCE)).floor();
        if n < 1.0 {
            return Err(ArbError::invalid(format!(
                "period {period:e} s is shorter than one sample at {sample_rate:e} S/s"
            )));
        }
        let n = n as usize;
        let step = period / n as f64;
        let times = (0..n).map(|i| i as f64 * step).collect();
        Ok(Self { period, times })
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The grid repeated `count` times, each copy shifted by one period.
    pub fn tiled(&self, count: usize) -> Vec<f64> {
        (0..count)
            .flat_map(|k| {
                let shift = k as f64 * self.period;
                self.times.iter().map(move |&t| t + shift)
            })
            .collect()
    }
}

/// A digitized channel: amplitudes and their sample times in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f64>,
    pub time: Vec<f64>,
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.samples, self.time)
    }
}

impl Arbgen {
    /// Render `cycles` repetitions of `channel` at `sample_rate` samples/s.
    ///
    /// The result holds `cycles · N` samples where `N = ⌊period · sample_rate⌋`.
    pub fn digitize(&self, channel: usize, sample_rate: f64, cycles: usize) -> Result<Waveform> {
        let channel_ref = self.channel_ref(channel)?;
        if cycles == 0 {
            return Err(ArbError::invalid("at least one cycle must be requested"));
        }
        require_positive("sample rate", sample_rate)?;

        let period = self.find_period()?;
        let grid = SampleGrid::new(period, sample_rate)?;
        let n = grid.len();
        debug!(
            "channel {channel}: period {period:e} s, {n} samples per cycle, {cycles} cycles"
        );

        let (cycle, _) = channel_ref.render(grid.times(), self.config.initial_value)?;

        let tiles = cycles + GUARD_CYCLES;
        let tiled_time = grid.tiled(tiles);
        let mut tiled = cycle.repeat(tiles);

        if self.config.pre_equalize {
            tiled = self.equalizer()?.apply(&tiled)?;
        }

        let window = n..(1 + cycles) * n;
        Ok(Waveform {
            samples: tiled[window.clone()].to_vec(),
            time: tiled_time[window].iter().map(|t| t - period).collect(),
        })
    }
}
