//! Main entry point for waveform encoding.
//!
//! Validates the parameters, compiles every channel, then streams the header
//! and samples to the caller's writer. Nothing is written unless validation
//! and compilation both succeed.

use std::io::Write;

use crate::error::WavegenResult;
use crate::expr::{SymbolTable, WaveSpec};
use crate::synth::{Synthesis, SynthesisParams};
use crate::wav::{self, EncodeOptions, EncodeReport};

/// Encodes one waveform stream.
///
/// # Arguments
/// * `writer` - Destination; flushed but not closed
/// * `sample_rate` - Samples per second, must be positive
/// * `bits_per_sample` - Nominal bit depth, must be positive
/// * `sample_count` - Frames to write, must not be negative
/// * `waveforms` - One expression or function per channel
/// * `write_header` - Whether to emit the 44-byte header
///
/// # Returns
/// The encode report, including the sample data digest
pub fn encode<W: Write + ?Sized>(
    writer: &mut W,
    sample_rate: i64,
    bits_per_sample: i64,
    sample_count: i64,
    waveforms: Vec<WaveSpec>,
    write_header: bool,
) -> WavegenResult<EncodeReport> {
    let params = SynthesisParams::new(sample_rate, bits_per_sample, sample_count, waveforms)?;
    let synthesis = Synthesis::prepare(params, &SymbolTable::standard())?;
    encode_synthesis(writer, &synthesis, EncodeOptions { write_header })
}

/// Encodes an already prepared run.
pub fn encode_synthesis<W: Write + ?Sized>(
    writer: &mut W,
    synthesis: &Synthesis,
    options: EncodeOptions,
) -> WavegenResult<EncodeReport> {
    let header = synthesis.header();
    log::debug!(
        "encoding {} channel(s) at {} Hz, {} bits, {} frames (block align {}, data size {})",
        header.channels,
        header.sample_rate,
        header.bits_per_sample,
        header.sample_count(),
        header.block_align,
        header.data_size
    );

    let report = wav::encode(writer, header, synthesis.frames(), options)?;

    log::debug!(
        "wrote {} frames, {} bytes (pcm hash {})",
        report.frames,
        report.bytes_written,
        report.pcm_hash
    );
    Ok(report)
}
