//! Generate command implementation
//!
//! Validates and compiles every channel before the output is opened, so a
//! rejected run never creates or truncates a file.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use wavegen::wav::{compute_pcm_hash, decode, extract_pcm_data};
use wavegen::{
    encode_synthesis, EncodeOptions, EncodeReport, SymbolTable, Synthesis, SynthesisParams,
    WaveSpec, WavegenError,
};

use super::json_output::{error_codes, GenerateOutput, GenerateResult, JsonError};
use super::reporting;
use super::{EXIT_INVALID_INPUT, EXIT_IO};
use crate::cli_args::Cli;
use crate::output::OutputTarget;

/// Arguments for one generate run, as given on the command line.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// OUTPUT positional (`-` for stdout)
    pub output: String,
    /// RATE positional
    pub sample_rate: i64,
    /// BITS positional
    pub bits_per_sample: i64,
    /// SAMPLES followed by the expressions, or just the expressions with
    /// `duration`
    pub rest: Vec<String>,
    /// --duration in seconds
    pub duration: Option<f64>,
    /// Cleared by --no-header
    pub write_header: bool,
    /// --json
    pub json: bool,
}

impl GenerateArgs {
    /// Takes the generate arguments out of a parsed command line, or `None`
    /// when OUTPUT, RATE or BITS is missing.
    pub fn from_cli(cli: Cli) -> Option<Self> {
        Some(Self {
            output: cli.output?,
            sample_rate: cli.rate?,
            bits_per_sample: cli.bits?,
            rest: cli.rest,
            duration: cli.duration,
            write_header: !cli.no_header,
            json: cli.json,
        })
    }
}

/// A failed run: what to report and which exit code to use.
struct Failure {
    error: JsonError,
    exit: u8,
}

impl Failure {
    fn input(error: JsonError) -> Self {
        Self {
            error,
            exit: EXIT_INVALID_INPUT,
        }
    }

    fn io(error: JsonError) -> Self {
        Self {
            error,
            exit: EXIT_IO,
        }
    }
}

impl From<WavegenError> for Failure {
    fn from(err: WavegenError) -> Self {
        let exit = if err.is_input_error() {
            EXIT_INVALID_INPUT
        } else {
            EXIT_IO
        };
        Self {
            error: JsonError::from(&err),
            exit,
        }
    }
}

/// Splits the trailing positionals into a sample count and expressions.
///
/// With `duration`, every value is an expression and the count is
/// `round(duration * sample_rate)`.
pub fn resolve_samples(
    sample_rate: i64,
    rest: &[String],
    duration: Option<f64>,
) -> Result<(i64, Vec<String>), JsonError> {
    if let Some(seconds) = duration {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(JsonError::new(
                error_codes::INVALID_DURATION,
                format!("invalid duration {}: expected a non-negative number of seconds", seconds),
            ));
        }
        let count = (seconds * sample_rate as f64).round() as i64;
        return Ok((count, rest.to_vec()));
    }

    let (samples, expressions) = rest.split_first().ok_or_else(|| {
        JsonError::new(error_codes::INVALID_SAMPLES, "missing sample count")
    })?;
    let count = samples.parse::<i64>().map_err(|_| {
        JsonError::new(
            error_codes::INVALID_SAMPLES,
            format!("invalid sample count '{}': expected an integer", samples),
        )
    })?;
    Ok((count, expressions.to_vec()))
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 invalid input, 2 output failure
pub fn run(args: &GenerateArgs) -> Result<ExitCode> {
    execute(args).map(ExitCode::from)
}

/// Runs the command and returns the raw exit status.
pub fn execute(args: &GenerateArgs) -> Result<u8> {
    let target = OutputTarget::parse(&args.output);

    match generate(args, &target) {
        Ok((report, expressions)) => {
            if args.json {
                let mut result =
                    GenerateResult::from_report(args.output.clone(), expressions, &report);
                if let (Some(path), true) = (target.path(), report.header_written) {
                    match verify(path, &report) {
                        Ok(verified) => result.verified = Some(verified),
                        Err(err) => {
                            let error =
                                JsonError::new(error_codes::VERIFY_READ, format!("{:#}", err));
                            reporting::emit_json(&target, &GenerateOutput::failure(vec![error]))?;
                            return Ok(EXIT_IO);
                        }
                    }
                }
                reporting::emit_json(&target, &GenerateOutput::success(result))?;
            } else {
                reporting::print_summary(&target, &report);
            }
            Ok(0)
        }
        Err(failure) => {
            log::debug!("generate failed with {}", failure.error.code);
            if args.json {
                reporting::emit_json(&target, &GenerateOutput::failure(vec![failure.error]))?;
            } else {
                reporting::print_error(&failure.error.message);
            }
            Ok(failure.exit)
        }
    }
}

fn generate(
    args: &GenerateArgs,
    target: &OutputTarget,
) -> Result<(EncodeReport, Vec<String>), Failure> {
    let (sample_count, expressions) =
        resolve_samples(args.sample_rate, &args.rest, args.duration).map_err(Failure::input)?;

    let channels = expressions
        .iter()
        .map(|source| WaveSpec::from(source.as_str()))
        .collect();
    let params = SynthesisParams::new(
        args.sample_rate,
        args.bits_per_sample,
        sample_count,
        channels,
    )?;
    let synthesis = Synthesis::prepare(params, &SymbolTable::standard())?;
    if args.write_header {
        synthesis.header().ensure_writable()?;
    }

    log::info!("writing {} channel(s) to {}", expressions.len(), target);
    let mut writer = target.open().map_err(|err| {
        Failure::io(JsonError::new(
            error_codes::OUTPUT_CREATE,
            format!("{:#}", err),
        ))
    })?;
    let report = encode_synthesis(
        &mut writer,
        &synthesis,
        EncodeOptions {
            write_header: args.write_header,
        },
    )?;
    Ok((report, expressions))
}

/// Reads the written file back and checks its header and sample digest.
fn verify(path: &Path, report: &EncodeReport) -> Result<bool> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read back {}", path.display()))?;
    let decoded = match decode(&bytes) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::warn!("written file does not decode: {}", err);
            return Ok(false);
        }
    };
    let hash_matches = extract_pcm_data(&bytes)
        .map(|pcm| compute_pcm_hash(pcm) == report.pcm_hash)
        .unwrap_or(false);
    Ok(decoded.header == report.header && hash_matches)
}
