use log::debug;

use crate::engine::Arbgen;
use crate::error::Result;

impl Arbgen {
    /// Duration of one repetition shared by every channel.
    ///
    /// A non-zero `defined_period` wins outright. Otherwise each channel is
    /// dry-run at `t = 0` and the longest final offset is the period.
    pub fn find_period(&self) -> Result<f64> {
        if self.config.defined_period > 0.0 {
            return Ok(self.config.defined_period);
        }

        let mut period = 0.0f64;
        for (index, channel) in self.channels.iter().enumerate() {
            let duration = channel.duration()?;
            debug!("channel {index} resolves to {duration:e} s");
            period = period.max(duration);
        }
        Ok(period)
    }
}
