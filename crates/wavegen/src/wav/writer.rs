//! Streaming container encoder.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{WavegenError, WavegenResult};
use crate::synth::QuantizedFrame;

use super::hash::PcmDigest;
use super::header::{ContainerHeader, HEADER_SIZE};

/// Options for one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Whether to emit the 44-byte header before the sample data.
    pub write_header: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { write_header: true }
    }
}

/// Summary of a finished encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeReport {
    /// Header describing the stream (written or not).
    pub header: ContainerHeader,
    /// Whether the header was emitted.
    pub header_written: bool,
    /// Frames written.
    pub frames: u64,
    /// Total bytes written, header included.
    pub bytes_written: u64,
    /// BLAKE3 hash of the sample data only (not the header).
    pub pcm_hash: String,
}

/// Writes an optional header followed by every frame's bytes, in order.
///
/// The stream is written strictly forward; sizes in the header come from
/// `header`, so `frames` must yield exactly `header.sample_count()` frames of
/// `header.block_align` bytes each. A header whose sizes overflow their
/// 32-bit slots is rejected before anything is written; without a header the
/// stream may be of any length. The writer is flushed but not closed.
pub fn encode<W, I>(
    writer: &mut W,
    header: &ContainerHeader,
    frames: I,
    options: EncodeOptions,
) -> WavegenResult<EncodeReport>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = QuantizedFrame>,
{
    let mut bytes_written = 0u64;
    if options.write_header {
        header.write_to(writer)?;
        bytes_written += HEADER_SIZE as u64;
    }

    let block_align = usize::from(header.block_align);
    let mut digest = PcmDigest::new();
    let mut count = 0u64;
    for frame in frames {
        let bytes = frame.as_bytes();
        if bytes.len() != block_align {
            return Err(WavegenError::invalid_param(
                "frames",
                format!(
                    "frame {} has {} bytes, header block align is {}",
                    frame.index(),
                    bytes.len(),
                    block_align
                ),
            ));
        }
        writer.write_all(bytes)?;
        digest.update(bytes);
        count += 1;
    }

    if count != header.sample_count() {
        return Err(WavegenError::invalid_param(
            "frames",
            format!(
                "header announces {} frames, {} were written",
                header.sample_count(),
                count
            ),
        ));
    }

    writer.flush()?;
    bytes_written += digest.bytes();
    Ok(EncodeReport {
        header: *header,
        header_written: options.write_header,
        frames: count,
        bytes_written,
        pcm_hash: digest.finalize(),
    })
}
