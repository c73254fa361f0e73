//! Sample synthesis.
//!
//! A [`Synthesis`] is one prepared run: validated parameters plus one
//! compiled function per channel. Its [`Synthesis::frames`] iterator walks
//! the time axis at `t = i / sample_rate` and quantizes every channel into
//! its storage bytes.

mod frames;
mod params;
mod quantize;

pub use frames::{Frames, QuantizedFrame};
pub use params::SynthesisParams;
pub use quantize::{Quantizer, PRECISION_BITS};

use crate::error::{WavegenError, WavegenResult};
use crate::expr::{CompiledChannel, Compiler, SymbolTable};
use crate::wav::ContainerHeader;

/// A validated, compiled synthesis run.
#[derive(Debug, Clone)]
pub struct Synthesis {
    params: SynthesisParams,
    channels: Vec<CompiledChannel>,
    quantizer: Quantizer,
}

impl Synthesis {
    /// Compiles every channel of `params` against `symbols`.
    ///
    /// Fails with [`WavegenError::InvalidExpression`] on the first channel
    /// that does not compile.
    pub fn prepare(params: SynthesisParams, symbols: &SymbolTable) -> WavegenResult<Self> {
        let compiler = Compiler::new(symbols);
        let channels = params
            .channels()
            .iter()
            .enumerate()
            .map(|(channel, spec)| {
                log::trace!("compiling channel {}: {}", channel, spec.describe());
                compiler
                    .compile_spec(spec)
                    .map_err(|source| WavegenError::InvalidExpression { channel, source })
            })
            .collect::<WavegenResult<Vec<_>>>()?;

        let quantizer = quantizer_for(&params)?;
        Ok(Self {
            params,
            channels,
            quantizer,
        })
    }

    /// The run's parameters.
    pub fn params(&self) -> &SynthesisParams {
        &self.params
    }

    /// The derived container header.
    pub fn header(&self) -> &ContainerHeader {
        self.params.header()
    }

    /// Compiled channel functions, in output order.
    pub fn channels(&self) -> &[CompiledChannel] {
        &self.channels
    }

    /// The quantizer for the run's bit depth.
    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    /// Returns a fresh frame iterator starting at sample 0.
    pub fn frames(&self) -> Frames<'_> {
        Frames::new(
            &self.channels,
            self.quantizer,
            self.params.sample_rate(),
            self.params.sample_count(),
        )
    }
}

fn quantizer_for(params: &SynthesisParams) -> WavegenResult<Quantizer> {
    Quantizer::new(params.bits_per_sample()).ok_or_else(|| {
        WavegenError::invalid_param("bits_per_sample", "bit depth must be positive")
    })
}

/// Produces the frames for `params` from already-compiled channels.
///
/// `channels` must hold one function per channel of `params`.
pub fn synthesize<'a>(
    params: &SynthesisParams,
    channels: &'a [CompiledChannel],
) -> WavegenResult<Frames<'a>> {
    if channels.len() != params.channel_count() {
        return Err(WavegenError::invalid_param(
            "channels",
            format!(
                "expected {} compiled channels, got {}",
                params.channel_count(),
                channels.len()
            ),
        ));
    }
    Ok(Frames::new(
        channels,
        quantizer_for(params)?,
        params.sample_rate(),
        params.sample_count(),
    ))
}
