use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/*
Sample File Format
==================

Raw bytes, one per sample, no header. The sample rate travels out of band.

  code = (round(clip(x, 0, 1) · 255) + 128) mod 256

so 0.0 → 128, ~0.5 → 0 (wrapped), 1.0 → 127. Rounding is half-to-even.
*/

/// Quantizes one amplitude to its 8-bit code.
#[inline]
pub fn quantize_sample(x: f64) -> u8 {
    let level = (x.clamp(0.0, 1.0) * 255.0).round_ties_even();
    // NaN saturates to 0 in the cast
    (level as u8).wrapping_add(128)
}

/// Recovers the clipped amplitude from a code, to within half a step.
#[inline]
pub fn decode_sample(code: u8) -> f64 {
    code.wrapping_sub(128) as f64 / 255.0
}

pub fn quantize(samples: &[f64]) -> Vec<u8> {
    samples.iter().map(|&x| quantize_sample(x)).collect()
}

/// Writes `samples` as 8-bit codes and returns the number of bytes written.
pub fn write_samples<W: Write>(mut writer: W, samples: &[f64]) -> Result<usize> {
    let codes = quantize(samples);
    writer.write_all(&codes)?;
    writer.flush()?;
    Ok(codes.len())
}

/// Creates (or truncates) `path` and writes `samples` to it.
pub fn save<P: AsRef<Path>>(path: P, samples: &[f64]) -> Result<usize> {
    let file = File::create(path)?;
    write_samples(BufWriter::new(file), samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(quantize_sample(0.0), 128);
        assert_eq!(quantize_sample(1.0), 127);
        assert_eq!(quantize_sample(0.5), 0); // 127.5 rounds to 128, wraps
        assert_eq!(quantize_sample(100.0 / 255.0), 228);
    }

    #[test]
    fn out_of_range_is_clipped() {
        assert_eq!(quantize_sample(-0.3), quantize_sample(0.0));
        assert_eq!(quantize_sample(1.7), quantize_sample(1.0));
        assert_eq!(quantize_sample(f64::NAN), 128);
    }

    #[test]
    fn decode_recovers_clipped_amplitude() {
        for i in 0..=1000 {
            let x = -0.2 + 1.4 * i as f64 / 1000.0;
            let back = decode_sample(quantize_sample(x));
            let clipped = x.clamp(0.0, 1.0);
            assert!(
                (back - clipped).abs() <= 0.5 / 255.0 + 1e-12,
                "{x} -> {back}"
            );
        }
    }

    #[test]
    fn writes_one_byte_per_sample() {
        let mut out = Vec::new();
        let written = write_samples(&mut out, &[0.0, 0.25, 1.0]).unwrap();
        assert_eq!(written, 3);
        assert_eq!(out, vec![128, 192, 127]);
    }
}
