use std::f64::consts::PI;

use crate::dsp::special::sinc;
use crate::error::{ArbError, Result};

/*
Least-Squares FIR Design
========================

A type-I linear-phase filter with `2M + 1` taps has the real amplitude
response

  A(ω) = a₀ + 2 Σₖ aₖ cos(kω),   k = 1..M

Minimizing ∫ W(ω)(A(ω) − D(ω))² dω over the chosen bands gives the normal
equations Q·a = b with

  Q[i][j] = q[|i − j|] + q[i + j]      (Toeplitz + Hankel)
  q[n]    = Σ_bands W ∫ cos(πnf) df
  b[n]    = Σ_bands W ∫ D(f) cos(πnf) df

on normalized frequency f ∈ [0, 1] (1 = Nyquist). D is linear inside each
band, so every integral has a closed form in terms of sinc and cos.

Band layout
-----------

  bands   = [f0, f1, f1, f2, f2, ..., fN]   edges, consumed in pairs
  desired = [d0, d1, d1, d2, d2, ..., dN]   gain at each edge

Pairs (bands[2i], bands[2i+1]) are one band; a gap between pairs is a
"don't care" region.
*/

/// Designs a linear-phase FIR filter with `num_taps` taps (odd) that best
/// matches `desired` over `bands` in the least-squares sense.
pub fn firls(num_taps: usize, bands: &[f64], desired: &[f64]) -> Result<Vec<f64>> {
    if num_taps == 0 || num_taps % 2 == 0 {
        return Err(ArbError::invalid(format!(
            "least-squares FIR needs an odd, non-zero tap count, got {num_taps}"
        )));
    }
    if bands.len() != desired.len() || bands.is_empty() || bands.len() % 2 != 0 {
        return Err(ArbError::invalid(
            "bands and desired must be the same even length",
        ));
    }
    if bands.iter().any(|&f| !(0.0..=1.0).contains(&f)) {
        return Err(ArbError::invalid("band edges must lie in [0, 1]"));
    }
    if bands.windows(2).any(|w| w[1] < w[0]) {
        return Err(ArbError::invalid("band edges must be non-decreasing"));
    }

    let m = (num_taps - 1) / 2;
    let pairs: Vec<((f64, f64), (f64, f64))> = bands
        .chunks_exact(2)
        .zip(desired.chunks_exact(2))
        .map(|(f, d)| ((f[0], f[1]), (d[0], d[1])))
        .collect();

    // q[n] for n in 0..num_taps, only Q needs indices past m
    let q: Vec<f64> = (0..num_taps)
        .map(|n| {
            let n = n as f64;
            pairs
                .iter()
                .map(|&((f1, f2), _)| f2 * sinc(f2 * n) - f1 * sinc(f1 * n))
                .sum()
        })
        .collect();

    let mut normal = vec![vec![0.0; m + 1]; m + 1];
    for (i, row) in normal.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = q[i.abs_diff(j)] + q[i + j];
        }
    }

    let rhs: Vec<f64> = (0..=m)
        .map(|n| {
            pairs
                .iter()
                .map(|&((f1, f2), (d1, d2))| band_integral(n, f1, f2, d1, d2))
                .sum()
        })
        .collect();

    let half = solve(normal, rhs)?;

    let mut taps = Vec::with_capacity(num_taps);
    taps.extend(half[1..].iter().rev());
    taps.push(2.0 * half[0]);
    taps.extend(&half[1..]);
    Ok(taps)
}

// ∫ D(f) cos(πnf) df over [f1, f2] with D linear from d1 to d2
fn band_integral(n: usize, f1: f64, f2: f64, d1: f64, d2: f64) -> f64 {
    let slope = if f2 > f1 { (d2 - d1) / (f2 - f1) } else { 0.0 };
    let intercept = d1 - f1 * slope;
    let antiderivative = |f: f64| {
        let linear = f * (slope * f + intercept) * sinc(f * n as f64);
        if n == 0 {
            linear - slope * f * f / 2.0
        } else {
            let pn = PI * n as f64;
            linear + slope * (pn * f).cos() / (pn * pn)
        }
    };
    antiderivative(f2) - antiderivative(f1)
}

/// Solves `a · x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0f64, |acc, &x| acc.max(x.abs()));
    let tolerance = scale * n as f64 * f64::EPSILON;

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() <= tolerance {
            return Err(ArbError::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}

/// Direct-form FIR filtering. Samples before the start are taken to equal
/// `signal[0]`, which is the steady state for a constant input.
pub fn lfilter(taps: &[f64], signal: &[f64]) -> Vec<f64> {
    let Some(&first) = signal.first() else {
        return Vec::new();
    };
    (0..signal.len())
        .map(|n| {
            taps.iter()
                .enumerate()
                .map(|(k, &b)| b * n.checked_sub(k).map_or(first, |i| signal[i]))
                .sum()
        })
        .collect()
}

/// Zero-phase filtering: forward pass, then a pass over the reversed output.
///
/// The signal is extended at both ends by `3 · taps.len()` samples of odd
/// reflection about its end points so the passes start near steady state.
/// The magnitude response is squared and the group delay cancels.
pub fn filtfilt(taps: &[f64], signal: &[f64]) -> Result<Vec<f64>> {
    let pad = 3 * taps.len();
    if signal.len() <= pad {
        return Err(ArbError::invalid(format!(
            "zero-phase filtering needs more than {pad} samples, got {}",
            signal.len()
        )));
    }

    let len = signal.len();
    let first = signal[0];
    let last = signal[len - 1];

    let mut extended = Vec::with_capacity(len + 2 * pad);
    extended.extend((1..=pad).rev().map(|i| 2.0 * first - signal[i]));
    extended.extend_from_slice(signal);
    extended.extend((1..=pad).map(|i| 2.0 * last - signal[len - 1 - i]));

    let mut forward = lfilter(taps, &extended);
    forward.reverse();
    let mut backward = lfilter(taps, &forward);
    backward.reverse();

    Ok(backward[pad..pad + len].to_vec())
}
