use log::debug;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::dsp::fir::{filtfilt, firls};
use crate::dsp::special::sinc;
use crate::error::Result;

/*
DAC Pre-Equalization
====================

A DAC holds each code for one sample period (zero-order hold). Holding is a
convolution with a rectangle one sample wide, whose magnitude response is

  |H(f)| = sinc(f / 2)        f normalized so 1 = Nyquist

That rolls off to 2/π (≈ −3.9 dB) at Nyquist. Pre-emphasizing the samples
with the inverse response flattens what actually comes out of the DAC.

The filter is applied zero-phase (forward and backward), which squares its
magnitude response. Each pass therefore targets the square root:

  target(f) = 1 / sqrt(sinc(f / 2))

Band layout for N taps: N − 2 interior points spread evenly over (0, 1),
each doubled so consecutive bands share an edge, then the end points 0 and
1. The fit is least-squares over the whole band from DC to Nyquist.
*/

/// Linear-phase FIR filter inverting a zero-order-hold DAC's sinc roll-off.
#[derive(Debug, Clone, PartialEq)]
pub struct Equalizer {
    taps: Vec<f64>,
}

impl Equalizer {
    /// Designs the equalizer with `num_taps` taps. The count must be odd.
    pub fn design(num_taps: usize) -> Result<Self> {
        let interior: Vec<f64> = match num_taps {
            0..=2 => Vec::new(),
            _ => (1..num_taps - 1)
                .map(|i| i as f64 / (num_taps - 1) as f64)
                .collect(),
        };

        let mut bands = Vec::with_capacity(2 * interior.len() + 2);
        bands.push(0.0);
        for &f in &interior {
            bands.push(f);
            bands.push(f);
        }
        bands.push(1.0);

        let desired: Vec<f64> = bands.iter().map(|&f| Self::target_gain(f)).collect();
        let taps = firls(num_taps, &bands, &desired)?;

        debug!(
            "designed {num_taps}-tap DAC pre-equalizer, dc gain {:.4}",
            taps.iter().sum::<f64>()
        );
        Ok(Self { taps })
    }

    /// Desired single-pass gain at normalized frequency `f` (1 = Nyquist).
    pub fn target_gain(f: f64) -> f64 {
        1.0 / sinc(f / 2.0).sqrt()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.taps
    }

    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Runs the filter forward and backward over `signal`.
    pub fn apply(&self, signal: &[f64]) -> Result<Vec<f64>> {
        filtfilt(&self.taps, signal)
    }

    /// Single-pass magnitude response on `n_fft / 2 + 1` bins from DC to
    /// Nyquist. `n_fft` is raised to the tap count if smaller.
    pub fn magnitude_response(&self, n_fft: usize) -> Vec<f64> {
        let n_fft = n_fft.max(self.taps.len()).max(2);
        let mut buffer: Vec<Complex<f64>> = self
            .taps
            .iter()
            .map(|&b| Complex::new(b, 0.0))
            .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
            .take(n_fft)
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n_fft);
        fft.process(&mut buffer);

        buffer[..=n_fft / 2].iter().map(|c| c.norm()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_gain_endpoints() {
        assert_eq!(Equalizer::target_gain(0.0), 1.0);
        let nyquist = Equalizer::target_gain(1.0);
        let expected = (std::f64::consts::PI / 2.0).sqrt();
        assert!((nyquist - expected).abs() < 1e-12, "got {nyquist}");
    }

    #[test]
    fn design_has_requested_length_and_symmetry() {
        let eq = Equalizer::design(31).unwrap();
        assert_eq!(eq.num_taps(), 31);
        let taps = eq.coefficients();
        for i in 0..taps.len() {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn response_tracks_inverse_sinc() {
        let eq = Equalizer::design(31).unwrap();
        let n_fft = 512;
        let response = eq.magnitude_response(n_fft);
        assert_eq!(response.len(), n_fft / 2 + 1);

        for (bin, &actual) in response.iter().enumerate() {
            let f = bin as f64 / (n_fft / 2) as f64;
            let expected = Equalizer::target_gain(f);
            assert!(
                (actual - expected).abs() < 0.03,
                "bin {bin} (f = {f:.3}): expected {expected:.4}, got {actual:.4}"
            );
        }
    }

    #[test]
    fn response_boosts_toward_nyquist() {
        let eq = Equalizer::design(7).unwrap();
        let response = eq.magnitude_response(64);
        let dc = response[0];
        let top = *response.last().unwrap();
        assert!((dc - 1.0).abs() < 0.03, "dc gain {dc}");
        assert!(top > dc * 1.15, "expected high-frequency boost, got {top}");
    }

    #[test]
    fn even_tap_count_is_rejected() {
        assert!(Equalizer::design(30).is_err());
    }
}
