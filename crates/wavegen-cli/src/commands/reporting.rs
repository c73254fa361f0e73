//! Human-readable and JSON reporting on stderr/stdout.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use wavegen::EncodeReport;

use crate::output::OutputTarget;

/// Writes `value` as pretty JSON. The report goes to stderr when the stream
/// itself is on stdout.
pub(crate) fn emit_json<T: Serialize>(target: &OutputTarget, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    if target.is_stdout() {
        eprintln!("{}", text);
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text).context("Failed to write JSON output")?;
    }
    Ok(())
}

/// Prints an error line on stderr.
pub(crate) fn print_error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

/// Prints the run summary on stderr.
pub(crate) fn print_summary(target: &OutputTarget, report: &EncodeReport) {
    let header = &report.header;
    eprintln!("{} {}", "Wrote:".green().bold(), target);
    eprintln!("  {:<10} {}", "channels".dimmed(), header.channels);
    eprintln!("  {:<10} {} Hz", "rate".dimmed(), header.sample_rate);
    eprintln!(
        "  {:<10} {} ({} byte(s) per sample)",
        "bits".dimmed(),
        header.bits_per_sample,
        header.bytes_per_sample
    );
    eprintln!(
        "  {:<10} {} ({:.3} s)",
        "samples".dimmed(),
        report.frames,
        header.duration_seconds()
    );
    eprintln!(
        "  {:<10} {}{}",
        "bytes".dimmed(),
        report.bytes_written,
        if report.header_written {
            ""
        } else {
            " (no header)"
        }
    );
    eprintln!("  {:<10} {}", "pcm hash".dimmed(), &report.pcm_hash[..16]);
}
