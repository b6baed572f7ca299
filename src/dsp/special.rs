use std::f64::consts::{FRAC_1_SQRT_2, PI};

/*
Special Functions
=================

Gaussian edges are defined through the standard normal distribution:

  ndtr(x)   Φ(x), the probability that a standard normal sample is <= x.
  ndtri(p)  Φ⁻¹(p), the point where the CDF reaches p.

The CDF goes through the complementary error function:

  Φ(x) = ½ · erfc(−x / √2)

erfc uses the Chebyshev-fitted rational form from Numerical Recipes
(fractional error below 1.2e-7 everywhere). The inverse uses Acklam's rational
approximation (relative error below 1.15e-9) split into a central region and
two tails. Both are far below the 1/255 resolution of the exported codes.
*/

/// Complementary error function, `1 − erf(x)`.
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let ans = t * poly.exp();
    if x >= 0.0 {
        ans
    } else {
        2.0 - ans
    }
}

/// Standard normal cumulative distribution function.
pub fn ndtr(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

const P_LOW: f64 = 0.024_25;

/// Inverse of [`ndtr`]. Returns `-inf` for `p <= 0`, `+inf` for `p >= 1`
/// and NaN for NaN input.
pub fn ndtri(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        tail(p)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    } else {
        -tail(1.0 - p)
    }
}

// Lower tail; the upper tail is its mirror image.
fn tail(p: f64) -> f64 {
    let q = (-2.0 * p.ln()).sqrt();
    let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
    let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
    num / den
}

/// Normalized sinc, `sin(πx) / (πx)` with `sinc(0) = 1`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndtr_known_values() {
        let cases = [
            (0.0, 0.5),
            (1.0, 0.841_344_746_068_543),
            (-1.0, 0.158_655_253_931_457),
            (1.959_963_984_540_054, 0.975),
            (-3.0, 0.001_349_898_031_630_095),
        ];
        for (x, expected) in cases {
            let actual = ndtr(x);
            assert!(
                (actual - expected).abs() < 1e-7,
                "ndtr({x}) expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn ndtri_inverts_ndtr() {
        for &p in &[1e-6, 0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99, 1.0 - 1e-6] {
            let x = ndtri(p);
            let back = ndtr(x);
            assert!(
                (back - p).abs() < 1e-6 * p.max(1e-2),
                "ndtr(ndtri({p})) = {back}"
            );
        }
    }

    #[test]
    fn ndtri_is_antisymmetric() {
        assert_eq!(ndtri(0.5), 0.0);
        let lo = ndtri(0.1);
        let hi = ndtri(0.9);
        assert!((lo + hi).abs() < 1e-9);
        assert!((hi - 1.281_551_565_545).abs() < 1e-8);
    }

    #[test]
    fn ndtri_saturates_outside_unit_interval() {
        assert_eq!(ndtri(0.0), f64::NEG_INFINITY);
        assert_eq!(ndtri(1.0), f64::INFINITY);
        assert!(ndtri(f64::NAN).is_nan());
    }

    #[test]
    fn sinc_zeros_and_peak() {
        assert_eq!(sinc(0.0), 1.0);
        assert!(sinc(1.0).abs() < 1e-15);
        assert!(sinc(2.0).abs() < 1e-15);
        assert!((sinc(0.5) - 2.0 / PI).abs() < 1e-15);
    }
}
