//! CLI command implementations

use anyhow::Result;

use crate::cli_args::Cli;
use generate::GenerateArgs;

pub mod generate;
pub mod json_output;
pub mod symbols;

mod reporting;

/// Exit code for invalid parameters, sample counts or expressions.
pub const EXIT_INVALID_INPUT: u8 = 1;

/// Exit code for output failures.
pub const EXIT_IO: u8 = 2;

/// Runs the generate command for a parsed command line.
///
/// Missing positionals are an input error.
pub fn run_generate(cli: Cli) -> Result<u8> {
    match GenerateArgs::from_cli(cli) {
        Some(args) => generate::execute(&args),
        None => {
            reporting::print_error("OUTPUT, RATE and BITS are required");
            Ok(EXIT_INVALID_INPUT)
        }
    }
}
