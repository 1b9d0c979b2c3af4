//! Rule requiring every logical line to end in a terminator.

use puso_core::{Category, Finding, LogicalLine, Rule};

/// Rule code for require-terminator.
pub const CODE: &str = "PS006";

/// Rule name for require-terminator.
pub const NAME: &str = "require-terminator";

/// Characters a logical line may end with.
pub const TERMINATORS: &[char] = &[':', ',', ';', '\\'];

/// Requires logical lines to end in `;` or another terminator.
///
/// Imports and lines closing a block comment are exempt.
#[derive(Debug, Clone, Default)]
pub struct RequireTerminator;

impl RequireTerminator {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RequireTerminator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires every statement line to end with a terminator such as `;`"
    }

    fn check_logical_line(&self, line: &LogicalLine<'_>) -> Option<Finding> {
        if line.is_import() || line.closes_block_comment() {
            return None;
        }

        let closing = line.closing_line();
        let trimmed = closing.trimmed();
        if trimmed.ends_with(TERMINATORS) {
            return None;
        }

        Some(Finding::new(
            Category::Syntax,
            closing.index,
            trimmed.chars().count(),
            "expected terminator",
        ))
    }
}
