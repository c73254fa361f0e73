//! Wavegen
//!
//! This crate turns per-channel waveform definitions into uncompressed PCM
//! WAV streams.
//!
//! # Overview
//!
//! Each channel is a function of time `t` in seconds, given either as an
//! expression string (compiled once against a fixed symbol table) or as a
//! native closure. The encoder samples every channel at `t = i / sample_rate`,
//! quantizes the amplitude to the requested bit depth and writes a canonical
//! 44-byte RIFF/WAVE header followed by interleaved sample data.
//!
//! - **Expressions** - arithmetic, comparisons, conditionals and math functions
//! - **Waveforms** - square, triangle and sawtooth with a 2π period
//! - **Envelopes** - quadratic fade-in and fade-out
//! - **Any bit depth** - any positive depth, stored in whole bytes
//!
//! # Determinism
//!
//! Output is a pure function of the parameters. The header has no timestamps
//! and every encode reports a BLAKE3 hash of its sample data.
//!
//! # Example
//!
//! ```
//! let mut out = Vec::new();
//! let report = wavegen::encode(&mut out, 8000, 8, 4, vec!["sq(t*1000)".into()], true)?;
//!
//! assert_eq!(out.len(), 48);
//! assert_eq!(report.frames, 4);
//! # Ok::<(), wavegen::WavegenError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`encode()`] - Main entry point
//! - [`expr`] - Expression compiler and symbol table
//! - [`synth`] - Parameter validation, quantization and frame generation
//! - [`wav`] - Canonical WAV header, encoder and decoder
//! - [`waveform`] - Periodic waveforms and envelopes

pub mod error;
pub mod expr;
pub mod generate;
pub mod synth;
pub mod wav;
pub mod waveform;

// Re-export main types at crate root
pub use error::{WavegenError, WavegenResult};
pub use expr::{CompiledChannel, Compiler, SymbolTable, WaveSpec};
pub use generate::{encode, encode_synthesis};
pub use synth::{Synthesis, SynthesisParams};
pub use wav::{ContainerHeader, EncodeOptions, EncodeReport, WavWriter};
