use log::trace;

use crate::error::{ArbError, Result};
use crate::primitive::{
    edge::{Edge, Pulse},
    function::UserFunction,
    sinusoid::Sinusoid,
    Polarity, Primitive,
};

/// One output's timeline: an append-only list of primitives.
#[derive(Debug, Default)]
pub struct Channel {
    primitives: Vec<Primitive>,
}

impl Channel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.primitives.get(index)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub(crate) fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Sums every primitive over `t`, threading the offset from 0.
    ///
    /// The accumulator starts at `baseline`. Returns the summed signal and
    /// the final offset.
    pub fn render(&self, t: &[f64], baseline: f64) -> Result<(Vec<f64>, f64)> {
        let mut acc = vec![baseline; t.len()];
        let end = self
            .primitives
            .iter()
            .enumerate()
            .try_fold(0.0, |offset, (i, primitive)| {
                let next = primitive.accumulate(t, offset, &mut acc)?;
                trace!("primitive {i}: offset {offset:e} -> {next:e}");
                Ok::<_, ArbError>(next)
            })?;
        Ok((acc, end))
    }

    /// Duration of this channel alone: the offset left after a dry run of
    /// every primitive at the single instant `t = 0`.
    pub fn duration(&self) -> Result<f64> {
        let (_, end) = self.render(&[0.0], 0.0)?;
        Ok(end)
    }
}

/// Mutable handle for appending primitives to one channel.
///
/// Obtained from [`Arbgen::channel`](crate::Arbgen::channel). Calls chain:
///
/// ```ignore
/// arb.channel(0)?
///     .value(0.0)
///     .delay(200e-9)?
///     .pos_pulse(Pulse::new(EdgeShape::Gaussian, 100e-9, 100e-9, 400e-9, 1.0))?
///     .delay(200e-9)?;
/// ```
pub struct ChannelMut<'a> {
    channel: &'a mut Channel,
    index: usize,
}

impl<'a> ChannelMut<'a> {
    pub(crate) fn new(channel: &'a mut Channel, index: usize) -> Self {
        Self { channel, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Hold `level` from the current offset onward.
    pub fn value(&mut self, level: f64) -> &mut Self {
        self.channel.push(Primitive::Value(level));
        self
    }

    /// Advance the offset by `duration` seconds.
    pub fn delay(&mut self, duration: f64) -> Result<&mut Self> {
        self.primitive(Primitive::Delay(duration))
    }

    pub fn pos_edge(&mut self, edge: Edge) -> Result<&mut Self> {
        self.edge(Polarity::Rising, edge)
    }

    pub fn neg_edge(&mut self, edge: Edge) -> Result<&mut Self> {
        self.edge(Polarity::Falling, edge)
    }

    pub fn edge(&mut self, polarity: Polarity, edge: Edge) -> Result<&mut Self> {
        self.primitive(Primitive::Edge(polarity, edge))
    }

    /// Rising edge, hold for `width`, falling edge.
    pub fn pos_pulse(&mut self, pulse: Pulse) -> Result<&mut Self> {
        self.pulse(Polarity::Rising, pulse)
    }

    /// Falling edge, hold for `width`, rising edge.
    pub fn neg_pulse(&mut self, pulse: Pulse) -> Result<&mut Self> {
        self.pulse(Polarity::Falling, pulse)
    }

    fn pulse(&mut self, polarity: Polarity, pulse: Pulse) -> Result<&mut Self> {
        let parts = [
            Primitive::Edge(polarity, pulse.leading_edge()),
            Primitive::Delay(pulse.width),
            Primitive::Edge(polarity.opposite(), pulse.trailing_edge()),
        ];
        // validated up front so a bad pulse never lands half-appended
        for part in &parts {
            part.validate()?;
        }
        for part in parts {
            self.channel.push(part);
        }
        Ok(self)
    }

    pub fn sine(&mut self, sinusoid: Sinusoid) -> &mut Self {
        self.channel.push(Primitive::Sine(sinusoid));
        self
    }

    pub fn cosine(&mut self, sinusoid: Sinusoid) -> &mut Self {
        self.channel.push(Primitive::Cosine(sinusoid));
        self
    }

    /// Append a caller-supplied primitive.
    pub fn function<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&[f64], f64) -> (Vec<f64>, f64) + Send + Sync + 'static,
    {
        self.channel.push(Primitive::Function(UserFunction::new(f)));
        self
    }

    /// Append any primitive, subject to the same checks as the typed calls.
    pub fn primitive(&mut self, primitive: Primitive) -> Result<&mut Self> {
        primitive.validate()?;
        self.channel.push(primitive);
        Ok(self)
    }
}
