//! Validated synthesis parameters.

use crate::error::{WavegenError, WavegenResult};
use crate::expr::WaveSpec;
use crate::wav::ContainerHeader;

/// Immutable configuration for one synthesis run.
///
/// Construct with [`SynthesisParams::new`], which validates every field and
/// derives the container header up front so that nothing is written for an
/// invalid run.
#[derive(Debug, Clone)]
pub struct SynthesisParams {
    sample_rate: u32,
    bits_per_sample: u16,
    sample_count: u64,
    channels: Vec<WaveSpec>,
    header: ContainerHeader,
}

impl SynthesisParams {
    /// Validates raw caller input.
    ///
    /// Integers are taken as `i64` so that negative values coming from a
    /// caller are reported as [`WavegenError::InvalidParameter`] rather than
    /// being unrepresentable.
    ///
    /// Fails when the sample rate or bit depth is not positive, the sample
    /// count is negative, there are no channels, or a frame does not fit the
    /// block align field. Header sizes that only matter when the header is
    /// written are checked by the encoder.
    pub fn new(
        sample_rate: i64,
        bits_per_sample: i64,
        sample_count: i64,
        channels: Vec<WaveSpec>,
    ) -> WavegenResult<Self> {
        if sample_rate <= 0 {
            return Err(WavegenError::invalid_param(
                "sample_rate",
                format!("illegal sample rate {}: must be positive", sample_rate),
            ));
        }
        let sample_rate = u32::try_from(sample_rate).map_err(|_| {
            WavegenError::invalid_param(
                "sample_rate",
                format!("sample rate {} exceeds the 32-bit header field", sample_rate),
            )
        })?;

        if bits_per_sample <= 0 {
            return Err(WavegenError::invalid_param(
                "bits_per_sample",
                format!(
                    "illegal number of bits per sample {}: must be positive",
                    bits_per_sample
                ),
            ));
        }
        let bits_per_sample = u16::try_from(bits_per_sample).map_err(|_| {
            WavegenError::invalid_param(
                "bits_per_sample",
                format!(
                    "{} bits per sample exceeds the 16-bit header field",
                    bits_per_sample
                ),
            )
        })?;

        if sample_count < 0 {
            return Err(WavegenError::invalid_param(
                "sample_count",
                format!("illegal number of samples {}: must not be negative", sample_count),
            ));
        }
        let sample_count = sample_count as u64;

        if channels.is_empty() {
            return Err(WavegenError::invalid_param(
                "channels",
                "illegal number of channels 0: at least one waveform is required",
            ));
        }
        let channel_count = u16::try_from(channels.len()).map_err(|_| {
            WavegenError::invalid_param(
                "channels",
                format!("{} channels exceed the 16-bit header field", channels.len()),
            )
        })?;

        let header =
            ContainerHeader::new(channel_count, sample_rate, bits_per_sample, sample_count)?;

        Ok(Self {
            sample_rate,
            bits_per_sample,
            sample_count,
            channels,
            header,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Nominal bit depth.
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Number of frames to synthesize.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Channel definitions, in output order.
    pub fn channels(&self) -> &[WaveSpec] {
        &self.channels
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Container header derived from these parameters.
    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono() -> Vec<WaveSpec> {
        vec![WaveSpec::from("sin(t)")]
    }

    fn param_name(err: WavegenError) -> String {
        match err {
            WavegenError::InvalidParameter { name, .. } => name,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_params() {
        let params = SynthesisParams::new(44100, 16, 10, mono()).unwrap();
        assert_eq!(params.sample_rate(), 44100);
        assert_eq!(params.bits_per_sample(), 16);
        assert_eq!(params.sample_count(), 10);
        assert_eq!(params.channel_count(), 1);
        assert_eq!(params.header().data_size, 20);
    }

    #[test]
    fn test_zero_and_negative_sample_rate() {
        assert_eq!(param_name(SynthesisParams::new(0, 16, 1, mono()).unwrap_err()), "sample_rate");
        assert_eq!(param_name(SynthesisParams::new(-1, 16, 1, mono()).unwrap_err()), "sample_rate");
        assert_eq!(
            param_name(SynthesisParams::new(i64::from(u32::MAX) + 1, 16, 1, mono()).unwrap_err()),
            "sample_rate"
        );
    }

    #[test]
    fn test_bit_depth_bounds() {
        assert_eq!(param_name(SynthesisParams::new(8000, 0, 1, mono()).unwrap_err()), "bits_per_sample");
        assert_eq!(param_name(SynthesisParams::new(8000, -8, 1, mono()).unwrap_err()), "bits_per_sample");
        assert_eq!(param_name(SynthesisParams::new(8000, 65536, 1, mono()).unwrap_err()), "bits_per_sample");
        assert!(SynthesisParams::new(8000, 1, 1, mono()).is_ok());
        assert!(SynthesisParams::new(8000, 64, 1, mono()).is_ok());
        let wide = SynthesisParams::new(8000, 65, 1, mono()).unwrap();
        assert_eq!(wide.header().block_align, 9);
        assert!(SynthesisParams::new(8000, 65535, 1, mono()).is_ok());
    }

    #[test]
    fn test_negative_sample_count() {
        assert_eq!(param_name(SynthesisParams::new(8000, 8, -1, mono()).unwrap_err()), "sample_count");
        assert!(SynthesisParams::new(8000, 8, 0, mono()).is_ok());
    }

    #[test]
    fn test_no_channels() {
        assert_eq!(param_name(SynthesisParams::new(8000, 8, 1, vec![]).unwrap_err()), "channels");
    }

    #[test]
    fn test_rate_checked_before_channels() {
        // Validation order: rate, bits, count, channels
        assert_eq!(param_name(SynthesisParams::new(0, 0, -1, vec![]).unwrap_err()), "sample_rate");
        assert_eq!(param_name(SynthesisParams::new(1, 0, -1, vec![]).unwrap_err()), "bits_per_sample");
        assert_eq!(param_name(SynthesisParams::new(1, 8, -1, vec![]).unwrap_err()), "sample_count");
    }

    #[test]
    fn test_headerless_size_is_not_capped() {
        // 2^31 mono 16-bit frames is 4 GiB of sample data
        let params = SynthesisParams::new(8000, 16, 1 << 31, mono()).unwrap();
        assert_eq!(params.header().data_size, 1 << 32);
        assert!(params.header().ensure_writable().is_err());
    }
}
