//! Wavegen CLI - waveform synthesis from math expressions
//!
//! Writes one PCM WAV stream per invocation, or lists the symbols available
//! to expressions.

use std::process::ExitCode;

use clap::Parser;

use wavegen_cli::cli_args::Cli;
use wavegen_cli::commands;
use wavegen_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = if cli.list_symbols {
        commands::symbols::run(cli.json)
    } else {
        commands::run_generate(cli).map(ExitCode::from)
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(commands::EXIT_IO)
        }
    }
}
