//! Canonical WAV parsing and sample decoding.
//!
//! Reads back what [`super::encode`] writes: a 44-byte header followed by
//! packed samples at any nonzero depth.

use thiserror::Error;

use crate::synth::Quantizer;

use super::header::{ContainerHeader, FMT_CHUNK_SIZE, HEADER_SIZE, PCM_FORMAT};

/// Errors that can occur while decoding a canonical WAV stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Data is too short to contain the header or the announced samples.
    #[error("WAV data too short: expected at least {expected} bytes, got {actual}")]
    DataTooShort { expected: usize, actual: usize },

    /// A fixed chunk identifier is missing.
    #[error("expected chunk id {expected:?} at offset {offset}")]
    BadChunkId { expected: &'static str, offset: usize },

    /// The fmt chunk is not the 16-byte PCM layout.
    #[error("unsupported fmt chunk size {0} (only 16 supported)")]
    UnsupportedFmtSize(u32),

    /// Only integer PCM is supported.
    #[error("unsupported audio format code {0} (only PCM/1 supported)")]
    UnsupportedAudioFormat(u16),

    /// A zero bit depth.
    #[error("unsupported bits per sample: {0}")]
    UnsupportedBitsPerSample(u16),

    /// A stored field disagrees with the value derived from the others.
    #[error("header field {field} is {found}, expected {expected}")]
    Inconsistent {
        field: &'static str,
        found: u64,
        expected: u64,
    },
}

/// A decoded stream.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedWav {
    /// Parsed header.
    pub header: ContainerHeader,
    /// Unshifted signed codes, interleaved by channel.
    pub codes: Vec<i128>,
    /// Amplitudes (`code / max_volume`), interleaved by channel.
    pub samples: Vec<f64>,
}

impl DecodedWav {
    /// Samples of one channel, in time order.
    pub fn channel(&self, channel: usize) -> impl Iterator<Item = f64> + '_ {
        let channels = usize::from(self.header.channels);
        self.samples
            .iter()
            .skip(channel)
            .step_by(channels.max(1))
            .copied()
    }
}

fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn expect_id(bytes: &[u8], offset: usize, expected: &'static str) -> Result<(), DecodeError> {
    if &bytes[offset..offset + 4] == expected.as_bytes() {
        Ok(())
    } else {
        Err(DecodeError::BadChunkId { expected, offset })
    }
}

fn check(field: &'static str, found: u64, expected: u64) -> Result<(), DecodeError> {
    if found == expected {
        Ok(())
    } else {
        Err(DecodeError::Inconsistent {
            field,
            found,
            expected,
        })
    }
}

/// Parses and cross-checks the 44-byte canonical header.
pub fn parse_header(bytes: &[u8]) -> Result<ContainerHeader, DecodeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DecodeError::DataTooShort {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        });
    }

    expect_id(bytes, 0, "RIFF")?;
    expect_id(bytes, 8, "WAVE")?;
    expect_id(bytes, 12, "fmt ")?;
    expect_id(bytes, 36, "data")?;

    let fmt_size = le_u32(bytes, 16);
    if fmt_size != FMT_CHUNK_SIZE {
        return Err(DecodeError::UnsupportedFmtSize(fmt_size));
    }
    let audio_format = le_u16(bytes, 20);
    if audio_format != PCM_FORMAT {
        return Err(DecodeError::UnsupportedAudioFormat(audio_format));
    }

    let riff_size = le_u32(bytes, 4);
    let channels = le_u16(bytes, 22);
    let sample_rate = le_u32(bytes, 24);
    let byte_rate = le_u32(bytes, 28);
    let block_align = le_u16(bytes, 32);
    let bits_per_sample = le_u16(bytes, 34);
    let data_size = le_u32(bytes, 40);

    if bits_per_sample == 0 {
        return Err(DecodeError::UnsupportedBitsPerSample(bits_per_sample));
    }

    let bytes_per_sample = super::ceil_to_byte(bits_per_sample) / 8;
    let expected_align = u64::from(channels) * u64::from(bytes_per_sample);
    check("block_align", u64::from(block_align), expected_align)?;
    check(
        "byte_rate",
        u64::from(byte_rate),
        u64::from(sample_rate) * expected_align,
    )?;
    check("riff_size", u64::from(riff_size), 36 + u64::from(data_size))?;
    if block_align > 0 && data_size % u32::from(block_align) != 0 {
        return Err(DecodeError::Inconsistent {
            field: "data_size",
            found: u64::from(data_size),
            expected: u64::from(data_size - data_size % u32::from(block_align)),
        });
    }

    Ok(ContainerHeader {
        channels,
        sample_rate,
        bits_per_sample,
        bytes_per_sample: bytes_per_sample as u16,
        block_align,
        byte_rate: u64::from(byte_rate),
        data_size: u64::from(data_size),
        riff_size: u64::from(riff_size),
    })
}

/// Decodes raw sample bytes laid out as described by `header`.
pub fn decode_samples(header: &ContainerHeader, data: &[u8]) -> Result<DecodedWav, DecodeError> {
    let quantizer = Quantizer::new(header.bits_per_sample)
        .ok_or(DecodeError::UnsupportedBitsPerSample(header.bits_per_sample))?;
    let data_size = usize::try_from(header.data_size).unwrap_or(usize::MAX);
    if data.len() < data_size {
        return Err(DecodeError::DataTooShort {
            expected: data_size,
            actual: data.len(),
        });
    }

    let width = usize::from(header.bytes_per_sample);
    let mut codes = Vec::with_capacity(data_size / width.max(1));
    let mut samples = Vec::with_capacity(codes.capacity());
    for chunk in data[..data_size].chunks_exact(width) {
        codes.push(quantizer.unpack(chunk));
        samples.push(quantizer.dequantize(chunk));
    }

    Ok(DecodedWav {
        header: *header,
        codes,
        samples,
    })
}

/// Decodes a complete canonical WAV file.
pub fn decode(bytes: &[u8]) -> Result<DecodedWav, DecodeError> {
    let header = parse_header(bytes)?;
    decode_samples(&header, &bytes[HEADER_SIZE..])
}
