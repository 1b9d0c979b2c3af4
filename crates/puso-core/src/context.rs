//! Context types for rule execution.

use crate::source::SourceLine;

/// Context provided to whole-program rules.
///
/// Program rules run before any logical line is resolved and see every
/// physical line, including blanks and block-comment bodies.
#[derive(Debug, Clone, Copy)]
pub struct ProgramContext<'a> {
    /// Identifier of the source, used only for display.
    pub source_id: &'a str,
    /// All physical lines, in order.
    pub lines: &'a [SourceLine],
}

impl<'a> ProgramContext<'a> {
    /// Creates a new program context.
    #[must_use]
    pub fn new(source_id: &'a str, lines: &'a [SourceLine]) -> Self {
        Self { source_id, lines }
    }

    /// Number of physical lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
