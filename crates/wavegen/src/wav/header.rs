//! Canonical 44-byte RIFF/WAVE header.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{WavegenError, WavegenResult};

/// Size of the canonical header in bytes.
pub const HEADER_SIZE: usize = 44;

/// Size of the PCM `fmt ` chunk body.
pub const FMT_CHUNK_SIZE: u32 = 16;

/// Audio format tag for integer PCM.
pub const PCM_FORMAT: u16 = 1;

/// Rounds a bit depth up to the next whole byte.
pub fn ceil_to_byte(bits: u16) -> u32 {
    (u32::from(bits) + 7) / 8 * 8
}

/// Header fields derived from the synthesis parameters.
///
/// Every field is a pure function of channel count, sample rate, bit depth
/// and sample count. Sizes are held at full width so that a headerless
/// stream may exceed what the 32-bit slots can announce;
/// [`ContainerHeader::ensure_writable`] rejects such a header before it is
/// serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerHeader {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Nominal bit depth, as written to the header (not rounded up).
    pub bits_per_sample: u16,
    /// Storage bytes per channel sample.
    pub bytes_per_sample: u16,
    /// Bytes per frame across all channels.
    pub block_align: u16,
    /// Bytes per second.
    pub byte_rate: u64,
    /// Size of the sample data in bytes.
    pub data_size: u64,
    /// RIFF chunk size (file size minus the 8-byte RIFF preamble).
    pub riff_size: u64,
}

impl ContainerHeader {
    /// Derives the header for a run.
    ///
    /// Fails when a frame does not fit the 16-bit block align field. The
    /// 32-bit size fields are checked by [`Self::ensure_writable`].
    pub fn new(
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
        sample_count: u64,
    ) -> WavegenResult<Self> {
        // ceil_to_byte(u16::MAX) / 8 == 8192, always fits in u16
        let bytes_per_sample = (ceil_to_byte(bits_per_sample) / 8) as u16;

        let block_align = channels.checked_mul(bytes_per_sample).ok_or_else(|| {
            WavegenError::invalid_param(
                "channels",
                format!(
                    "{} channels of {} bytes exceed the 16-bit block align field",
                    channels, bytes_per_sample
                ),
            )
        })?;

        let data_size = u64::from(block_align)
            .checked_mul(sample_count)
            .filter(|size| size.checked_add(36).is_some())
            .ok_or_else(|| {
                WavegenError::invalid_param(
                    "sample_count",
                    format!(
                        "{} frames of {} bytes exceed the addressable stream size",
                        sample_count, block_align
                    ),
                )
            })?;

        Ok(Self {
            channels,
            sample_rate,
            bits_per_sample,
            bytes_per_sample,
            block_align,
            byte_rate: u64::from(sample_rate) * u64::from(block_align),
            data_size,
            riff_size: 36 + data_size,
        })
    }

    /// Checks that every size fits its 32-bit header slot.
    pub fn ensure_writable(&self) -> WavegenResult<()> {
        if self.byte_rate > u64::from(u32::MAX) {
            return Err(WavegenError::invalid_param(
                "sample_rate",
                format!(
                    "byte rate {} Hz x {} bytes exceeds the 32-bit header field",
                    self.sample_rate, self.block_align
                ),
            ));
        }
        if self.riff_size > u64::from(u32::MAX) {
            return Err(WavegenError::invalid_param(
                "sample_count",
                format!(
                    "{} frames of {} bytes exceed the 4 GiB RIFF size limit",
                    self.sample_count(),
                    self.block_align
                ),
            ));
        }
        Ok(())
    }

    /// Bit depth rounded up to whole bytes.
    pub fn ceil_bits(&self) -> u32 {
        ceil_to_byte(self.bits_per_sample)
    }

    /// Left shift that places a sample in the high bits of its storage.
    pub fn shift(&self) -> u32 {
        self.ceil_bits() - u32::from(self.bits_per_sample)
    }

    /// Number of frames the data chunk holds.
    pub fn sample_count(&self) -> u64 {
        if self.block_align == 0 {
            0
        } else {
            self.data_size / u64::from(self.block_align)
        }
    }

    /// Total size of a file with this header, in bytes.
    pub fn file_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.data_size
    }

    /// Duration of the audio in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.sample_count() as f64 / f64::from(self.sample_rate)
    }

    /// Serializes the header, little-endian throughout.
    pub fn to_bytes(&self) -> WavegenResult<[u8; HEADER_SIZE]> {
        self.ensure_writable()?;
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(b"RIFF");
        bytes[4..8].copy_from_slice(&(self.riff_size as u32).to_le_bytes());
        bytes[8..12].copy_from_slice(b"WAVE");

        // fmt chunk
        bytes[12..16].copy_from_slice(b"fmt ");
        bytes[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        bytes[20..22].copy_from_slice(&PCM_FORMAT.to_le_bytes());
        bytes[22..24].copy_from_slice(&self.channels.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[28..32].copy_from_slice(&(self.byte_rate as u32).to_le_bytes());
        bytes[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        bytes[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());

        // data chunk
        bytes[36..40].copy_from_slice(b"data");
        bytes[40..44].copy_from_slice(&(self.data_size as u32).to_le_bytes());
        Ok(bytes)
    }

    /// Writes the header to `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> WavegenResult<()> {
        writer.write_all(&self.to_bytes()?)?;
        Ok(())
    }
}
