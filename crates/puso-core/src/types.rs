//! Core types for rule findings and style violations.

use serde::{Deserialize, Serialize};

/// Kind of style violation, shown as the exception-like prefix of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Source does not match the required syntax or style.
    #[serde(rename = "SyntaxError")]
    Syntax,
    /// A banned construct was used.
    #[serde(rename = "BannedConstructError")]
    BannedConstruct,
    /// An import breaks the import policy.
    #[serde(rename = "ImportError")]
    Import,
    /// The program has more physical lines than allowed.
    #[serde(rename = "LineCountError")]
    LineCount,
    /// An attempt to get around a structural restriction.
    #[serde(rename = "BypassError")]
    Bypass,
}

impl Category {
    /// The name used in rendered reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "SyntaxError",
            Self::BannedConstruct => "BannedConstructError",
            Self::Import => "ImportError",
            Self::LineCount => "LineCountError",
            Self::Bypass => "BypassError",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a rule reports: where and why, without knowing which rule it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 0-based physical line index.
    pub line: usize,
    /// Column in the trimmed physical line.
    pub column: usize,
    /// Violation category.
    pub category: Category,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(category: Category, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            category,
            message: message.into(),
        }
    }
}

/// The single failure a check can produce.
///
/// A run stops at the first violation, so a check yields at most one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{category}: {message}")]
pub struct StyleViolation {
    /// Rule code (e.g., "PS006").
    pub code: String,
    /// Rule name (e.g., "require-terminator").
    pub rule: String,
    /// Violation category.
    pub category: Category,
    /// Human-readable message.
    pub message: String,
    /// 0-based physical line index.
    pub line: usize,
    /// Column in the trimmed source line.
    pub column: usize,
    /// Trimmed text of the offending line.
    pub source_line: String,
}

impl StyleViolation {
    /// 1-based line number for display.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line + 1
    }

    /// Renders the traceback-style report:
    ///
    /// ```text
    /// File "<source-id>", line <n>
    ///     <source text>
    ///     <spaces>^
    /// <Category>: <message>
    /// ```
    #[must_use]
    pub fn render(&self, source_id: &str) -> String {
        format!(
            "File \"{source_id}\", line {}\n    {}\n    {}^\n{}: {}",
            self.line_number(),
            self.source_line,
            " ".repeat(self.column),
            self.category,
            self.message,
        )
    }

    /// One-line `file:line:col: Category [code] message` form.
    #[must_use]
    pub fn compact(&self, source_id: &str) -> String {
        format!(
            "{source_id}:{}:{}: {} [{}] {}",
            self.line_number(),
            self.column + 1,
            self.category,
            self.code,
            self.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(column: usize) -> StyleViolation {
        StyleViolation {
            code: "PS006".to_string(),
            rule: "require-terminator".to_string(),
            category: Category::Syntax,
            message: "expected terminator".to_string(),
            line: 2,
            column,
            source_line: "print(x)".to_string(),
        }
    }

    #[test]
    fn render_places_caret_under_column() {
        let rendered = make_violation(8).render("script.py");
        insta::assert_snapshot!(rendered, @r#"
        File "script.py", line 3
            print(x)
                    ^
        SyntaxError: expected terminator
        "#);
    }

    #[test]
    fn render_at_column_zero() {
        let rendered = make_violation(0).render("<stdin>");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "File \"<stdin>\", line 3");
        assert_eq!(lines[2], "    ^");
    }

    #[test]
    fn compact_is_one_based() {
        assert_eq!(
            make_violation(8).compact("a.py"),
            "a.py:3:9: SyntaxError [PS006] expected terminator"
        );
    }

    #[test]
    fn display_is_category_and_message() {
        assert_eq!(
            make_violation(0).to_string(),
            "SyntaxError: expected terminator"
        );
    }

    #[test]
    fn category_names_match_reports() {
        assert_eq!(Category::BannedConstruct.to_string(), "BannedConstructError");
        assert_eq!(Category::LineCount.as_str(), "LineCountError");
    }
}
