//! CLI argument definitions for the wavegen command-line interface.
//!
//! The positional layout is `OUTPUT RATE BITS SAMPLES EXPR...`. Numeric
//! positionals are taken as signed integers so that range errors are
//! reported by the synthesizer with the parameter's name. Options must come
//! before the expressions, which may themselves start with `-`.

use clap::{ArgAction, Parser};

/// Wavegen - waveform synthesis from math expressions
#[derive(Debug, Parser)]
#[command(name = "wavegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output file path, or `-` for stdout
    #[arg(value_name = "OUTPUT", required_unless_present = "list_symbols")]
    pub output: Option<String>,

    /// Sample rate in Hz
    #[arg(
        value_name = "RATE",
        allow_negative_numbers = true,
        required_unless_present = "list_symbols"
    )]
    pub rate: Option<i64>,

    /// Bits per sample (any positive depth)
    #[arg(
        value_name = "BITS",
        allow_negative_numbers = true,
        required_unless_present = "list_symbols"
    )]
    pub bits: Option<i64>,

    /// Sample count followed by one expression in `t` per channel
    /// (the sample count is omitted when --duration is given)
    #[arg(
        value_name = "SAMPLES EXPR",
        num_args = 1..,
        allow_hyphen_values = true,
        required_unless_present = "list_symbols"
    )]
    pub rest: Vec<String>,

    /// Length in seconds; the sample count becomes round(SECONDS * RATE)
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Write raw sample data without the 44-byte header
    #[arg(long)]
    pub no_header: bool,

    /// Output a machine-readable JSON report (no colored output)
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// List the constants and functions available in expressions
    #[arg(long)]
    pub list_symbols: bool,
}
