//! WAV writer builder pattern.

use std::io::Write;

use crate::error::WavegenResult;
use crate::synth::Synthesis;

use super::writer::{encode, EncodeOptions, EncodeReport};

/// WAV writer builder over a prepared run.
#[derive(Debug)]
pub struct WavWriter<'a> {
    synthesis: &'a Synthesis,
    options: EncodeOptions,
}

impl<'a> WavWriter<'a> {
    /// Creates a writer that emits the header by default.
    pub fn new(synthesis: &'a Synthesis) -> Self {
        Self {
            synthesis,
            options: EncodeOptions::default(),
        }
    }

    /// Sets whether the 44-byte header is written.
    pub fn header(mut self, write_header: bool) -> Self {
        self.options.write_header = write_header;
        self
    }

    /// Synthesizes and writes the whole stream to `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> WavegenResult<EncodeReport> {
        encode(
            writer,
            self.synthesis.header(),
            self.synthesis.frames(),
            self.options,
        )
    }

    /// Synthesizes the whole stream into a byte vector.
    pub fn write_to_vec(&self) -> Vec<u8> {
        let header = self.synthesis.header();
        let capacity = if self.options.write_header {
            header.file_size()
        } else {
            header.data_size
        };
        let mut buffer = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));
        self.write_to(&mut buffer)
            .expect("writing to Vec should not fail");
        buffer
    }
}
