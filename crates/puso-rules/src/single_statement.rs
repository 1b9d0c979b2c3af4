//! Rule restricting a program to a single physical line.
//!
//! # Rationale
//!
//! In one-line mode the whole program is one line of separator-joined
//! statements. Two tricks get around that: padding a statement with extra
//! leading whitespace after a separator, and wrapping a whole statement in
//! brackets so several statements hide inside one expression.
//!
//! # Configuration
//!
//! - `strict`: reject any leading space after a separator instead of only
//!   runs of two or more (default: false)

use puso_core::splitter::{self, Fragment};
use puso_core::utils::matching_close;
use puso_core::{Category, Finding, ProgramContext, Rule, SourceLine};

/// Rule code for single-statement.
pub const CODE: &str = "PS001";

/// Rule name for single-statement.
pub const NAME: &str = "single-statement";

/// Leading whitespace that is rejected in lenient mode.
const LENIENT_WIDTH: usize = 2;

/// Leading whitespace that is rejected in strict mode.
const STRICT_WIDTH: usize = 1;

/// Requires the whole program to fit on one physical line.
#[derive(Debug, Clone, Default)]
pub struct SingleStatement {
    /// Reject a single leading space too.
    pub strict: bool,
}

impl SingleStatement {
    /// Creates a new rule in lenient mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict mode.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn min_width(&self) -> usize {
        if self.strict {
            STRICT_WIDTH
        } else {
            LENIENT_WIDTH
        }
    }

    fn check_fragment(&self, line: &SourceLine, fragment: &Fragment<'_>) -> Option<Finding> {
        let column = line.trimmed_column(fragment.start);

        if fragment.start > 0 && fragment.leading_whitespace() >= self.min_width() {
            return Some(Finding::new(
                Category::Bypass,
                line.index,
                column,
                "nice try buddy.",
            ));
        }

        if is_wrapped(fragment.text) {
            return Some(Finding::new(
                Category::Bypass,
                line.index,
                line.trimmed_column(fragment.text_start()),
                "statement cannot be wrapped in brackets",
            ));
        }

        None
    }
}

/// Returns true if one bracket pair spans the whole text.
fn is_wrapped(text: &str) -> bool {
    text.len() >= 2 && matching_close(text, 0) == Some(text.len() - 1)
}

impl Rule for SingleStatement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Restricts the program to one line of separator-joined statements"
    }

    fn check_program(&self, ctx: &ProgramContext<'_>) -> Option<Finding> {
        if ctx.line_count() > 1 {
            return Some(Finding::new(
                Category::LineCount,
                1,
                0,
                "maximum line count exceeded",
            ));
        }

        let line = ctx.lines.first()?;
        splitter::split(&line.text)
            .iter()
            .find_map(|fragment| self.check_fragment(line, fragment))
    }
}
