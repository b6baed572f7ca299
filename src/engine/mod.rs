//! The `Arbgen` instance: owns the channels and the digitization settings.

pub mod digitize;
pub mod period;

use std::path::Path;

use log::info;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, ChannelMut};
use crate::dsp::equalizer::Equalizer;
use crate::error::{ArbError, Result};
use crate::io::export;
use crate::DEFAULT_EQUALIZATION_TAPS;

pub use digitize::{SampleGrid, Waveform};

/// Global settings shared by every channel of an instance.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbgenConfig {
    /// Number of output channels
    pub channels: usize,
    /// Level every channel's sum starts from
    pub initial_value: f64,
    /// Period override in seconds; 0 resolves it from the channels
    pub defined_period: f64,
    /// Pre-emphasize against the DAC's zero-order-hold roll-off
    pub pre_equalize: bool,
    /// Odd tap count of the pre-equalizer
    pub equalization_taps: usize,
}

impl Default for ArbgenConfig {
    fn default() -> Self {
        Self {
            channels: 1,
            initial_value: 0.0,
            defined_period: 0.0,
            pre_equalize: false,
            equalization_taps: DEFAULT_EQUALIZATION_TAPS,
        }
    }
}

impl ArbgenConfig {
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_initial_value(mut self, initial_value: f64) -> Self {
        self.initial_value = initial_value;
        self
    }

    pub fn with_defined_period(mut self, period: f64) -> Self {
        self.defined_period = period;
        self
    }

    pub fn with_pre_equalize(mut self, pre_equalize: bool) -> Self {
        self.pre_equalize = pre_equalize;
        self
    }

    pub fn with_equalization_taps(mut self, taps: usize) -> Self {
        self.equalization_taps = taps;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(ArbError::invalid("at least one channel is required"));
        }
        if !self.initial_value.is_finite() {
            return Err(ArbError::invalid(format!(
                "initial value must be finite, got {}",
                self.initial_value
            )));
        }
        if !(self.defined_period.is_finite() && self.defined_period >= 0.0) {
            return Err(ArbError::invalid(format!(
                "defined period must be zero (auto) or positive, got {}",
                self.defined_period
            )));
        }
        if self.equalization_taps == 0 || self.equalization_taps % 2 == 0 {
            return Err(ArbError::invalid(format!(
                "equalization taps must be odd, got {}",
                self.equalization_taps
            )));
        }
        Ok(())
    }
}

/// Waveform compiler for a multi-channel arbitrary-waveform generator.
///
/// Channels are built through [`ChannelMut`] handles and digitized on
/// demand; no sample data is kept between calls.
#[derive(Debug)]
pub struct Arbgen {
    channels: Vec<Channel>,
    config: ArbgenConfig,
}

impl Arbgen {
    pub fn new(config: ArbgenConfig) -> Result<Self> {
        config.validate()?;
        let channels = (0..config.channels).map(|_| Channel::new()).collect();
        Ok(Self { channels, config })
    }

    pub fn config(&self) -> &ArbgenConfig {
        &self.config
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Select a channel for appending primitives.
    pub fn channel(&mut self, index: usize) -> Result<ChannelMut<'_>> {
        let count = self.channels.len();
        self.channels
            .get_mut(index)
            .map(|channel| ChannelMut::new(channel, index))
            .ok_or(ArbError::OutOfRange { index, count })
    }

    pub fn channel_ref(&self, index: usize) -> Result<&Channel> {
        self.channels.get(index).ok_or(ArbError::OutOfRange {
            index,
            count: self.channels.len(),
        })
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// The pre-equalizer this instance applies when `pre_equalize` is set.
    pub fn equalizer(&self) -> Result<Equalizer> {
        Equalizer::design(self.config.equalization_taps)
    }

    /// Digitize `channel` and write it to `path` as raw unsigned 8-bit codes.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        channel: usize,
        sample_rate: f64,
        cycles: usize,
    ) -> Result<()> {
        let waveform = self.digitize(channel, sample_rate, cycles)?;
        let written = export::save(&path, &waveform.samples)?;
        info!(
            "channel {channel}: wrote {written} samples to {}",
            path.as_ref().display()
        );
        Ok(())
    }
}
