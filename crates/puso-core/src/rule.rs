//! The rule trait shared by every check.

use crate::context::ProgramContext;
use crate::source::{LogicalLine, Statement};
use crate::types::Finding;

/// A style rule.
///
/// A rule implements whichever hooks it needs; the others pass by default.
/// The engine calls the hooks in three passes:
///
/// 1. [`Rule::check_program`] once per source, before any line is resolved
/// 2. [`Rule::check_statement`] for every statement of a logical line
/// 3. [`Rule::check_logical_line`] once the statements of that line passed
///
/// Returning a [`Finding`] stops the whole run.
///
/// # Example
///
/// ```ignore
/// use puso_core::{Category, Finding, Rule, Statement};
///
/// pub struct NoPrint;
///
/// impl Rule for NoPrint {
///     fn name(&self) -> &'static str { "no-print" }
///     fn code(&self) -> &'static str { "PS100" }
///
///     fn check_statement(&self, stmt: &Statement<'_>) -> Option<Finding> {
///         stmt.text.starts_with("print(").then(|| {
///             Finding::new(Category::BannedConstruct, stmt.line, stmt.column, "print is banned")
///         })
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "require-terminator").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PS006").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks the program as a whole.
    fn check_program(&self, _ctx: &ProgramContext<'_>) -> Option<Finding> {
        None
    }

    /// Checks one statement.
    fn check_statement(&self, _stmt: &Statement<'_>) -> Option<Finding> {
        None
    }

    /// Checks a logical line after all of its statements passed.
    fn check_logical_line(&self, _line: &LogicalLine<'_>) -> Option<Finding> {
        None
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceLine;
    use crate::types::Category;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }

        fn check_statement(&self, stmt: &Statement<'_>) -> Option<Finding> {
            Some(Finding::new(
                Category::Syntax,
                stmt.line,
                stmt.column,
                "Test violation",
            ))
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = TestRule;
        let lines = SourceLine::from_text("x = 1");
        let ctx = ProgramContext::new("t.py", &lines);
        let logical = LogicalLine::new(&lines);

        assert_eq!(rule.description(), "");
        assert!(rule.check_program(&ctx).is_none());
        assert!(rule.check_logical_line(&logical).is_none());
        assert!(rule.check_statement(&logical.statements()[0]).is_some());
    }
}
