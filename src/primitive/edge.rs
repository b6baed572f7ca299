use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::special::{ndtr, ndtri};
use crate::error::{require_positive, ArbError, Result};

/*
Edge Shapes
===========

Every edge is a monotone transition from 0 to `amplitude`, placed so that it
crosses the centre threshold exactly at its offset and takes `rise_time` to
go from the low threshold to the high threshold.

Vocabulary
----------

  thresholds  Fractions of the full swing (default 10% / 50% / 90%) used to
              define where the edge is anchored and how fast it rises.

  rise_time   Seconds between the low and high threshold crossings.

  law         The unit transition u(x), 0 → 1. Thresholds are mapped
              through u⁻¹ and a slope k is chosen so that
              k · rise_time = u⁻¹(high) − u⁻¹(low).

Shapes
------

  Gaussian     u = Φ, the standard normal CDF. Smooth and symmetric; the
               classic band-limited step.

  Exponential  u(x) = 1 − e^(−x), clamped at 0 for x < 0. An RC charge
               curve with a hard corner at its start.

  Ramp         Linear from 0 to 1 over rise_time. The centre threshold only
               positions the ramp; its slope is 1 / rise_time.

  Square       Ideal step at the offset. rise_time is ignored.

      Gaussian        Exponential        Ramp            Square
                       ________
        ____          /                   ____           ______
       /             |                   /              |
  ____/         _____|              ____/          _____|
*/

/// Transition law of an edge.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeShape {
    Gaussian,
    Exponential,
    Ramp,
    Square,
}

impl FromStr for EdgeShape {
    type Err = ArbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gaussian" => Ok(EdgeShape::Gaussian),
            "exponential" => Ok(EdgeShape::Exponential),
            "ramp" => Ok(EdgeShape::Ramp),
            "square" => Ok(EdgeShape::Square),
            _ => Err(ArbError::invalid(format!("unknown edge shape '{s}'"))),
        }
    }
}

/// Threshold fractions of the full swing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub low: f64,
    pub center: f64,
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: 0.1,
            center: 0.5,
            high: 0.9,
        }
    }
}

impl Thresholds {
    pub fn new(low: f64, center: f64, high: f64) -> Self {
        Self { low, center, high }
    }
}

/// A single shaped transition.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub shape: EdgeShape,
    /// Seconds from the low to the high threshold crossing
    pub rise_time: f64,
    pub amplitude: f64,
    pub thresholds: Thresholds,
}

impl Edge {
    pub fn new(shape: EdgeShape, rise_time: f64, amplitude: f64) -> Self {
        Self {
            shape,
            rise_time,
            amplitude,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_positive("rise time", self.rise_time)?;
        Ok(())
    }

    /// Adds `sign · amplitude · u(t − offset)` into `acc`.
    pub(crate) fn accumulate(&self, sign: f64, t: &[f64], offset: f64, acc: &mut [f64]) {
        let amplitude = sign * self.amplitude;
        let law = Law::new(self.shape, self.rise_time, &self.thresholds);
        for (out, &time) in acc.iter_mut().zip(t) {
            *out += amplitude * law.at(time - offset);
        }
    }
}

// Shape parameters resolved once per render
enum Law {
    Gaussian { k: f64, center: f64 },
    Exponential { k: f64, center: f64 },
    Ramp { lead: f64, rise_time: f64 },
    Square,
}

impl Law {
    fn new(shape: EdgeShape, rise_time: f64, th: &Thresholds) -> Self {
        match shape {
            EdgeShape::Gaussian => {
                let (low, center, high) = (ndtri(th.low), ndtri(th.center), ndtri(th.high));
                Law::Gaussian {
                    k: (high - low) / rise_time,
                    center,
                }
            }
            EdgeShape::Exponential => {
                let inv = |p: f64| -(1.0 - p).ln();
                let (low, center, high) = (inv(th.low), inv(th.center), inv(th.high));
                Law::Exponential {
                    k: (high - low) / rise_time,
                    center,
                }
            }
            EdgeShape::Ramp => Law::Ramp {
                lead: th.center * rise_time,
                rise_time,
            },
            EdgeShape::Square => Law::Square,
        }
    }

    #[inline]
    fn at(&self, dt: f64) -> f64 {
        match *self {
            Law::Gaussian { k, center } => ndtr(k * dt + center),
            Law::Exponential { k, center } => (1.0 - (-k * dt - center).exp()).max(0.0),
            Law::Ramp { lead, rise_time } => ((dt + lead) / rise_time).clamp(0.0, 1.0),
            Law::Square => {
                if dt >= 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// A pulse: one edge out, a hold of `width`, and an edge back.
///
/// Appended as `Edge(rise)`, `Delay(width)`, `Edge(fall)`, so it advances
/// the channel offset by `width`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub shape: EdgeShape,
    pub rise_time: f64,
    pub fall_time: f64,
    /// Seconds between the centre crossings of the two edges
    pub width: f64,
    pub amplitude: f64,
    pub thresholds: Thresholds,
}

impl Pulse {
    pub fn new(shape: EdgeShape, rise_time: f64, fall_time: f64, width: f64, amplitude: f64) -> Self {
        Self {
            shape,
            rise_time,
            fall_time,
            width,
            amplitude,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn leading_edge(&self) -> Edge {
        Edge::new(self.shape, self.rise_time, self.amplitude).with_thresholds(self.thresholds)
    }

    pub fn trailing_edge(&self) -> Edge {
        Edge::new(self.shape, self.fall_time, self.amplitude).with_thresholds(self.thresholds)
    }
}

/// Rise time between the `low` and `high` threshold crossings of an RC
/// charge curve with time constant `rc`.
pub fn rc_to_rise_time(rc: f64, low: f64, high: f64) -> f64 {
    rc * ((1.0 - low).ln() - (1.0 - high).ln())
}
