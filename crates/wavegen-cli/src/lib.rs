//! Wavegen CLI library.
//!
//! Argument definitions, output sink selection and the command
//! implementations behind the `wavegen` binary.

pub mod cli_args;
pub mod commands;
pub mod logging;
pub mod output;
