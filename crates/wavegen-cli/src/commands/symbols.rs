//! Symbol listing command.
//!
//! Prints every name an expression may use.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use wavegen::expr::{Symbol, SymbolTable, TIME_VARIABLE};

use super::json_output::SymbolInfo;

/// Collects the listing for `table`, with the time variable first.
pub fn collect(table: &SymbolTable) -> Vec<SymbolInfo> {
    let mut infos = vec![SymbolInfo {
        name: TIME_VARIABLE.to_string(),
        kind: "variable".to_string(),
        arity: None,
        value: None,
    }];
    infos.extend(table.iter().map(|(name, symbol)| match symbol {
        Symbol::Constant(value) => SymbolInfo {
            name: name.to_string(),
            kind: "constant".to_string(),
            arity: None,
            value: Some(*value),
        },
        Symbol::Function(function) => SymbolInfo {
            name: name.to_string(),
            kind: "function".to_string(),
            arity: Some(function.arity()),
            value: None,
        },
    }));
    infos
}

/// Run the symbol listing
///
/// # Arguments
/// * `json_output` - Whether to print a JSON array instead of a table
pub fn run(json_output: bool) -> Result<ExitCode> {
    let infos = collect(&SymbolTable::standard());

    if json_output {
        let text = serde_json::to_string_pretty(&infos).context("Failed to serialize symbols")?;
        println!("{}", text);
        return Ok(ExitCode::SUCCESS);
    }

    for info in &infos {
        match (&info.arity, info.value) {
            (Some(arity), _) => println!(
                "{:<10} {} ({} arg)",
                info.name.cyan(),
                info.kind.dimmed(),
                arity
            ),
            (None, Some(value)) => {
                println!("{:<10} {} = {}", info.name.cyan(), info.kind.dimmed(), value)
            }
            (None, None) => println!("{:<10} {}", info.name.cyan(), info.kind.dimmed()),
        }
    }
    Ok(ExitCode::SUCCESS)
}
