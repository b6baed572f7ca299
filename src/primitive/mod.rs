//! Waveform construction instructions.
//!
//! A channel is an ordered list of [`Primitive`]s. Rendering folds over the
//! list carrying a running time offset: every primitive adds its contribution
//! to a shared accumulator and hands the (possibly advanced) offset to the
//! next one. Contributions are causal and anchored at the offset they
//! receive, so summing them assembles a piecewise signal without any
//! primitive knowing about its neighbours.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ArbError, Result};

/// Shaped transitions and the pulse composite.
pub mod edge;
/// Caller-supplied waveform functions.
pub mod function;
/// Free-running sine and cosine terms.
pub mod sinusoid;

use edge::Edge;
use function::UserFunction;
use sinusoid::Sinusoid;

/// Direction of an edge.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Rising,
    Falling,
}

impl Polarity {
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Rising => 1.0,
            Polarity::Falling => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Polarity::Rising => Polarity::Falling,
            Polarity::Falling => Polarity::Rising,
        }
    }
}

/// One timeline instruction.
pub enum Primitive {
    /// Holds `level` from the offset onward. Does not advance the offset.
    Value(f64),
    /// Contributes nothing and advances the offset by the duration.
    Delay(f64),
    /// Shaped transition centred on the offset. Does not advance the offset.
    Edge(Polarity, Edge),
    /// `level + amplitude · sin(2πft + φ)` over the whole grid.
    Sine(Sinusoid),
    /// `level + amplitude · cos(2πft + φ)` over the whole grid.
    Cosine(Sinusoid),
    /// Escape hatch: the function decides both contribution and next offset.
    Function(UserFunction),
}

impl Primitive {
    /// Adds this primitive's contribution over the time grid `t` into `acc`
    /// and returns the offset for the next primitive.
    ///
    /// `t` must be ascending and `acc.len() == t.len()`.
    pub fn accumulate(&self, t: &[f64], offset: f64, acc: &mut [f64]) -> Result<f64> {
        debug_assert_eq!(t.len(), acc.len());

        match self {
            Primitive::Value(level) => {
                for (out, &time) in acc.iter_mut().zip(t) {
                    if time >= offset {
                        *out += level;
                    }
                }
                Ok(offset)
            }
            Primitive::Delay(duration) => Ok(offset + duration),
            Primitive::Edge(polarity, edge) => {
                edge.accumulate(polarity.sign(), t, offset, acc);
                Ok(offset)
            }
            Primitive::Sine(sinusoid) => {
                sinusoid.accumulate(f64::sin, t, acc);
                Ok(offset)
            }
            Primitive::Cosine(sinusoid) => {
                sinusoid.accumulate(f64::cos, t, acc);
                Ok(offset)
            }
            Primitive::Function(function) => {
                let (contribution, next) = function.call(t, offset);
                if contribution.len() != t.len() {
                    return Err(ArbError::invalid(format!(
                        "user function returned {} samples for a {}-sample grid",
                        contribution.len(),
                        t.len()
                    )));
                }
                if !(next.is_finite() && next >= offset) {
                    return Err(ArbError::invalid(format!(
                        "user function moved the offset from {offset:e} to {next:e}"
                    )));
                }
                for (out, x) in acc.iter_mut().zip(contribution) {
                    *out += x;
                }
                Ok(next)
            }
        }
    }

    /// Checks the parameters every append path must enforce: edges need a
    /// positive rise time, delays must keep the offset non-decreasing.
    pub fn validate(&self) -> Result<()> {
        match self {
            Primitive::Delay(duration) if !(duration.is_finite() && *duration >= 0.0) => Err(
                ArbError::invalid(format!("delay must be non-negative and finite, got {duration}")),
            ),
            Primitive::Edge(_, edge) => edge.validate(),
            _ => Ok(()),
        }
    }

    /// This primitive's contribution on its own, alongside the next offset.
    pub fn contribution(&self, t: &[f64], offset: f64) -> Result<(Vec<f64>, f64)> {
        let mut out = vec![0.0; t.len()];
        let next = self.accumulate(t, offset, &mut out)?;
        Ok((out, next))
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Value(level) => f.debug_tuple("Value").field(level).finish(),
            Primitive::Delay(duration) => f.debug_tuple("Delay").field(duration).finish(),
            Primitive::Edge(polarity, edge) => {
                f.debug_tuple("Edge").field(polarity).field(edge).finish()
            }
            Primitive::Sine(s) => f.debug_tuple("Sine").field(s).finish(),
            Primitive::Cosine(s) => f.debug_tuple("Cosine").field(s).finish(),
            Primitive::Function(func) => f.debug_tuple("Function").field(func).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<f64> {
        (0..10).map(|i| i as f64).collect()
    }

    #[test]
    fn value_holds_from_offset() {
        let (out, next) = Primitive::Value(0.5).contribution(&grid(), 3.0).unwrap();
        assert_eq!(next, 3.0);
        assert_eq!(&out[..3], &[0.0; 3]);
        assert!(out[3..].iter().all(|&x| x == 0.5));
    }

    #[test]
    fn delay_only_advances() {
        let (out, next) = Primitive::Delay(2.5).contribution(&grid(), 1.0).unwrap();
        assert_eq!(next, 3.5);
        assert!(out.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn contributions_superpose() {
        let t = grid();
        let mut acc = vec![0.0; t.len()];
        let mut offset = 0.0;
        for p in [
            Primitive::Value(1.0),
            Primitive::Delay(4.0),
            Primitive::Value(-1.0),
        ] {
            offset = p.accumulate(&t, offset, &mut acc).unwrap();
        }
        assert_eq!(offset, 4.0);
        assert_eq!(&acc[..4], &[1.0; 4]);
        assert!(acc[4..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn function_length_mismatch_is_rejected() {
        let p = Primitive::Function(UserFunction::new(|_t: &[f64], offset| {
            (vec![1.0], offset)
        }));
        assert!(matches!(
            p.contribution(&grid(), 0.0),
            Err(ArbError::InvalidArgument(_))
        ));
    }

    #[test]
    fn function_may_not_rewind_or_lose_the_offset() {
        for bad in [f64::NAN, f64::INFINITY, 0.5] {
            let p = Primitive::Function(UserFunction::new(move |t: &[f64], _| {
                (vec![0.0; t.len()], bad)
            }));
            assert!(
                matches!(p.contribution(&grid(), 1.0), Err(ArbError::InvalidArgument(_))),
                "offset {bad} should be rejected"
            );
        }

        let hold = Primitive::Function(UserFunction::new(|t: &[f64], offset| {
            (vec![0.0; t.len()], offset)
        }));
        assert_eq!(hold.contribution(&grid(), 1.0).unwrap().1, 1.0);
    }

    #[test]
    fn validate_checks_delays_and_edges() {
        use edge::EdgeShape;

        assert!(Primitive::Delay(0.0).validate().is_ok());
        assert!(Primitive::Delay(-1e-9).validate().is_err());
        assert!(Primitive::Delay(f64::NAN).validate().is_err());
        for rise in [0.0, -1.0, f64::NAN] {
            let edge = Edge::new(EdgeShape::Gaussian, rise, 1.0);
            assert!(matches!(
                Primitive::Edge(Polarity::Rising, edge).validate(),
                Err(ArbError::InvalidArgument(_))
            ));
        }
        assert!(Primitive::Value(f64::MAX).validate().is_ok());
    }

    #[test]
    fn polarity_signs() {
        assert_eq!(Polarity::Rising.sign(), 1.0);
        assert_eq!(Polarity::Falling.sign(), -1.0);
        assert_eq!(Polarity::Rising.opposite(), Polarity::Falling);
    }
}
