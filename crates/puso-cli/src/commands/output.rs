//! Shared output formatting for check results.

use anyhow::Result;
use puso::{SourceLine, StyleViolation, ViolationDiagnostic};
use serde::Serialize;

use crate::OutputFormat;

/// JSON document printed by `--format json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    /// Sources checked before the run stopped.
    files_checked: usize,
    /// Identifier of the failing source.
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    /// The violation, if any.
    violation: Option<&'a StyleViolation>,
}

/// Prints the violation that stopped the run.
///
/// Human-readable formats go to stderr, JSON goes to stdout.
pub fn print_violation(
    violation: &StyleViolation,
    source_id: &str,
    lines: &[SourceLine],
    files_checked: usize,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => eprintln!("{}", violation.render(source_id)),
        OutputFormat::Compact => eprintln!("{}", violation.compact(source_id)),
        OutputFormat::Json => {
            return print_json(&JsonReport {
                files_checked,
                source: Some(source_id),
                violation: Some(violation),
            })
        }
        OutputFormat::Pretty => {
            let report = miette::Report::new(ViolationDiagnostic::new(violation, source_id, lines));
            eprintln!("{report:?}");
        }
    }
    Ok(())
}

/// Prints the result of a run without violations.
pub fn print_clean(files_checked: usize, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&JsonReport {
            files_checked,
            source: None,
            violation: None,
        }),
        _ => {
            tracing::info!("{} source(s) passed", files_checked);
            Ok(())
        }
    }
}

fn print_json(report: &JsonReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
