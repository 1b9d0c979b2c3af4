//! Rich rendering of a [`StyleViolation`] through `miette`.
//!
//! The plain traceback block comes from [`StyleViolation::render`]; this
//! module adapts a violation into a [`miette::Diagnostic`] with the whole
//! source attached so graphical handlers can underline the offending column.

use crate::source::SourceLine;
use crate::types::StyleViolation;
use miette::{Diagnostic, NamedSource, SourceSpan};

/// A violation with its source attached, for graphical reports.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{category}: {message}")]
#[diagnostic(code(puso::style_violation))]
pub struct ViolationDiagnostic {
    category: String,
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{rule}")]
    span: SourceSpan,
    rule: String,
    #[help]
    help: Option<String>,
}

impl ViolationDiagnostic {
    /// Creates a diagnostic for `violation` found in `lines`.
    #[must_use]
    pub fn new(violation: &StyleViolation, source_id: &str, lines: &[SourceLine]) -> Self {
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let offset = byte_offset(lines, violation.line, violation.column);

        Self {
            category: violation.category.to_string(),
            message: violation.message.clone(),
            src: NamedSource::new(source_id, text),
            span: SourceSpan::from((offset, 1)),
            rule: format!("{} [{}]", violation.rule, violation.code),
            help: Some(format!(
                "disable with `deny = [\"{}\"]` if this check does not apply",
                violation.rule
            )),
        }
    }
}

/// Byte offset of a (line, trimmed column) position in the joined source.
fn byte_offset(lines: &[SourceLine], line: usize, column: usize) -> usize {
    let mut offset = 0;
    for source_line in lines {
        if source_line.index == line {
            let indent = source_line.indent();
            let within = source_line.text[indent..]
                .char_indices()
                .nth(column)
                .map_or(source_line.text.len() - indent, |(i, _)| i);
            return offset + indent + within;
        }
        offset += source_line.text.len() + 1;
    }
    offset.saturating_sub(1)
}
