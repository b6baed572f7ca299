pub mod channel; // Ordered primitive timelines and their builder handle
pub mod dsp;
pub mod engine; // Period resolution and digitization
pub mod error;
pub mod io;
pub mod primitive; // Waveform construction instructions

pub use channel::{Channel, ChannelMut};
pub use dsp::equalizer::Equalizer;
pub use engine::{Arbgen, ArbgenConfig, Waveform};
pub use error::{ArbError, Result};
pub use primitive::{
    edge::{rc_to_rise_time, Edge, EdgeShape, Pulse, Thresholds},
    sinusoid::Sinusoid,
    Polarity, Primitive,
};

pub const DEFAULT_EQUALIZATION_TAPS: usize = 31;
/// Extra repetitions rendered around the requested window: one before, one after.
pub const GUARD_CYCLES: usize = 2;
