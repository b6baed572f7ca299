use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters shared by the sine and cosine primitives.
///
/// Sinusoids are not gated by the offset: they add
/// `level + amplitude · wave(2π · frequency · t + phase)` at every sample.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sinusoid {
    /// Hz
    pub frequency: f64,
    /// Radians
    pub phase: f64,
    pub amplitude: f64,
    /// DC level added under the wave
    pub level: f64,
}

impl Sinusoid {
    pub fn new(frequency: f64, phase: f64, amplitude: f64, level: f64) -> Self {
        Self {
            frequency,
            phase,
            amplitude,
            level,
        }
    }

    pub(crate) fn accumulate(&self, wave: fn(f64) -> f64, t: &[f64], acc: &mut [f64]) {
        let omega = TAU * self.frequency;
        for (out, &time) in acc.iter_mut().zip(t) {
            *out += self.level + self.amplitude * wave(omega * time + self.phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_and_cosine_quarter_period() {
        let s = Sinusoid::new(1.0, 0.0, 0.5, 0.5);
        let t = [0.0, 0.25, 0.5, 0.75];

        let mut sine = vec![0.0; 4];
        s.accumulate(f64::sin, &t, &mut sine);
        let expected = [0.5, 1.0, 0.5, 0.0];
        for (a, e) in sine.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "sine: expected {e}, got {a}");
        }

        let mut cosine = vec![0.0; 4];
        s.accumulate(f64::cos, &t, &mut cosine);
        let expected = [1.0, 0.5, 0.0, 0.5];
        for (a, e) in cosine.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "cosine: expected {e}, got {a}");
        }
    }

    #[test]
    fn phase_shifts_the_wave() {
        let s = Sinusoid::new(2.0, std::f64::consts::FRAC_PI_2, 1.0, 0.0);
        let mut out = vec![0.0; 1];
        s.accumulate(f64::sin, &[0.0], &mut out);
        assert!((out[0] - 1.0).abs() < 1e-12);
    }
}
