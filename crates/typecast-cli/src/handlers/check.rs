//! The `check` command: validate a configuration and show what it compiles to

use crate::cli::CheckArgs;
use crate::error::Result;
use colored::Colorize;
use std::io::Write;
use typecast_core::{PathSpec, TypecastConfig};

/// Handle the check command
pub fn handle_check(args: CheckArgs, config: &TypecastConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &args, config)
}

fn write_report<W: Write>(out: &mut W, args: &CheckArgs, config: &TypecastConfig) -> Result<()> {
    config.validate()?;
    let spec = PathSpec::compile_strict(
        config.json_paths().map(|c| (c.name.as_str(), c.target)),
    )?;

    writeln!(out, "{}", "Configuration is valid".green().bold())?;

    let columns: Vec<_> = config.column_casts().collect();
    writeln!(out, "{} ({})", "Columns".bold(), columns.len())?;
    for column in columns {
        writeln!(out, "  {} -> {}", column.name, column.target.to_string().cyan())?;
    }

    writeln!(
        out,
        "{} ({}, depth {})",
        "JSON paths".bold(),
        spec.len(),
        spec.max_depth()
    )?;
    for (pattern, target) in spec.patterns() {
        writeln!(out, "  {} -> {}", pattern, target.to_string().cyan())?;
    }

    if args.prefixes {
        let prefixes = spec.prefixes();
        writeln!(out, "{} ({})", "Prefixes".bold(), prefixes.len())?;
        for prefix in prefixes {
            writeln!(out, "  {}", prefix.dimmed())?;
        }
    }

    Ok(())
}
