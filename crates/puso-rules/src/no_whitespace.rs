//! Rule forbidding whitespace anywhere in the program.
//!
//! Dense mode: every non-blank line must be written without a single
//! whitespace character. The escaped space `\u0020` spelled out in the source
//! is rejected too, since it is the usual way around the first check.

use puso_core::{Category, Finding, ProgramContext, Rule};

/// Rule code for no-whitespace.
pub const CODE: &str = "PS002";

/// Rule name for no-whitespace.
pub const NAME: &str = "no-whitespace";

/// Escape text that smuggles a space past the character check.
const ESCAPED_SPACE: &str = r"\u0020";

/// Forbids whitespace characters in any non-blank line.
#[derive(Debug, Clone, Default)]
pub struct NoWhitespace;

impl NoWhitespace {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoWhitespace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids whitespace characters anywhere in the program"
    }

    fn check_program(&self, ctx: &ProgramContext<'_>) -> Option<Finding> {
        ctx.lines
            .iter()
            .filter(|line| !line.text.is_empty())
            .find(|line| {
                line.text.chars().any(char::is_whitespace) || line.text.contains(ESCAPED_SPACE)
            })
            .map(|line| {
                Finding::new(
                    Category::Syntax,
                    line.index,
                    0,
                    "whitespace is not permitted",
                )
            })
    }
}
