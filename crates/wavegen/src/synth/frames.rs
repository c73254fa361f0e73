//! Lazy frame generation.

use std::iter::FusedIterator;

use crate::expr::CompiledChannel;

use super::quantize::Quantizer;

/// One time step's quantized output across all channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedFrame {
    index: u64,
    codes: Vec<i128>,
    bytes: Vec<u8>,
    bytes_per_sample: usize,
}

impl QuantizedFrame {
    /// Sample index of this frame.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Stored codes, one per channel, in channel order.
    pub fn codes(&self) -> &[i128] {
        &self.codes
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.codes.len()
    }

    /// Storage bytes for one channel, or `None` past the last channel.
    pub fn channel_bytes(&self, channel: usize) -> Option<&[u8]> {
        let start = channel.checked_mul(self.bytes_per_sample)?;
        self.bytes.get(start..start.checked_add(self.bytes_per_sample)?)
    }

    /// All storage bytes, channel 0 first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Iterator over the frames of a run. Yields exactly `sample_count` frames.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    channels: &'a [CompiledChannel],
    quantizer: Quantizer,
    sample_rate: f64,
    next: u64,
    end: u64,
}

impl<'a> Frames<'a> {
    pub(crate) fn new(
        channels: &'a [CompiledChannel],
        quantizer: Quantizer,
        sample_rate: u32,
        sample_count: u64,
    ) -> Self {
        Self {
            channels,
            quantizer,
            sample_rate: f64::from(sample_rate),
            next: 0,
            end: sample_count,
        }
    }

    /// Time in seconds of sample `index`.
    pub fn time_of(&self, index: u64) -> f64 {
        index as f64 / self.sample_rate
    }

    fn render(&self, index: u64) -> QuantizedFrame {
        let t = self.time_of(index);
        let mut codes = Vec::with_capacity(self.channels.len());
        let mut bytes =
            Vec::with_capacity(self.channels.len() * self.quantizer.bytes_per_sample());
        for channel in self.channels {
            let code = self.quantizer.quantize(channel.eval(t));
            self.quantizer.pack(code, &mut bytes);
            codes.push(code);
        }
        QuantizedFrame {
            index,
            codes,
            bytes,
            bytes_per_sample: self.quantizer.bytes_per_sample(),
        }
    }
}

impl Iterator for Frames<'_> {
    type Item = QuantizedFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let frame = self.render(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n as u64).min(self.end);
        self.next()
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl FusedIterator for Frames<'_> {}
