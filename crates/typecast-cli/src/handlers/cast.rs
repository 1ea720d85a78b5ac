//! The `cast` command: filter JSON-lines records

use crate::cli::CastArgs;
use crate::error::{Error, Result};
use anyhow::Context;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use typecast_core::{TypecastConfig, TypecastFilter};

/// Counts reported once the input is exhausted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CastSummary {
    pub read: usize,
    pub written: usize,
    /// Records with at least one column nulled
    pub nulled: usize,
}

/// Handle the cast command
pub fn handle_cast(args: CastArgs, mut config: TypecastConfig) -> Result<()> {
    config.stop_on_invalid_record |= args.stop_on_invalid_record;
    config.strict_paths |= args.strict_paths;

    let filter = TypecastFilter::new(&config)?;

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound { path: path.clone() });
            }
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(BufReader::new(io::stdin().lock())),
    };

    let output: Box<dyn Write> = match &args.output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = process_lines(&filter, input, output, args.pretty)?;
    tracing::info!(
        read = summary.read,
        written = summary.written,
        nulled = summary.nulled,
        "Cast finished"
    );
    Ok(())
}

/// Filter every non-blank line of `input` and write the results to `output`
pub fn process_lines<R, W>(
    filter: &TypecastFilter,
    input: R,
    mut output: W,
    pretty: bool,
) -> Result<CastSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = CastSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        summary.read += 1;

        let record = match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(record)) => record,
            Ok(other) => {
                return Err(Error::InvalidInput {
                    line: line_number,
                    message: format!("expected a JSON object, got {}", kind_name(&other)),
                })
            }
            Err(e) => {
                return Err(Error::InvalidInput {
                    line: line_number,
                    message: e.to_string(),
                })
            }
        };

        let outcome = filter.filter_with_outcome(record)?;
        if !outcome.invalid_columns.is_empty() {
            summary.nulled += 1;
            tracing::debug!(
                line = line_number,
                columns = ?outcome.invalid_columns,
                "Record had columns nulled"
            );
        }

        let record = Value::Object(outcome.record);
        if pretty {
            serde_json::to_writer_pretty(&mut output, &record)?;
        } else {
            serde_json::to_writer(&mut output, &record)?;
        }
        output.write_all(b"\n")?;
        summary.written += 1;
    }

    output.flush()?;
    Ok(summary)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
