//! Logical line resolver.
//!
//! Walks physical lines in order and yields one [`LogicalLine`] per closed
//! run. A line keeps the run open when it is an import, ends in a
//! continuation character, or leaves the accumulated text unterminated
//! according to the oracle. Blank lines, `#` comments and block-comment
//! regions between runs are skipped.
//!
//! The resolver owns the block-comment state and the pending run; build a
//! fresh one for every source.

use crate::oracle::{self, Completeness};
use crate::source::{LogicalLine, SourceLine};
use crate::utils::lexical::{block_comment_delimiter, is_import_line};
use tracing::debug;

/// Trailing characters that keep a logical line open.
pub const CONTINUATION_CHARS: &[char] = &[':', ',', ';', '\\'];

/// Iterator over the logical lines of a source.
#[derive(Debug, Clone)]
pub struct LogicalLineResolver<'a> {
    lines: &'a [SourceLine],
    cursor: usize,
    /// Delimiter of the open block comment, if any.
    block_comment: Option<&'static str>,
}

impl<'a> LogicalLineResolver<'a> {
    /// Creates a resolver positioned at the first line.
    #[must_use]
    pub fn new(lines: &'a [SourceLine]) -> Self {
        Self {
            lines,
            cursor: 0,
            block_comment: None,
        }
    }

    /// Returns true while inside a block comment.
    #[must_use]
    pub fn in_block_comment(&self) -> bool {
        self.block_comment.is_some()
    }

    /// Handles a line seen while no run is pending. Returns true when the
    /// line is exempt and must not start a run.
    fn skip_exempt(&mut self, line: &SourceLine) -> bool {
        let trimmed = line.trimmed();
        if trimmed.is_empty() {
            return true;
        }

        if let Some(open) = self.block_comment {
            if trimmed.starts_with(open) || trimmed.ends_with(open) {
                debug!("Block comment closed at line {}", line.index + 1);
                self.block_comment = None;
            }
            return true;
        }

        if let Some(delimiter) = block_comment_delimiter(trimmed) {
            // `"""doc"""` opens and closes on the same line
            if !trimmed[delimiter.len()..].contains(delimiter) {
                debug!("Block comment opened at line {}", line.index + 1);
                self.block_comment = Some(delimiter);
            }
            return true;
        }

        line.is_comment()
    }

    /// Whether the run ending at `logical.closing_line()` stays open.
    fn continues(logical: &LogicalLine<'_>) -> bool {
        let closing = logical.closing_line();
        let trimmed = closing.trimmed();

        // blank and comment lines inside a run never close it
        if trimmed.is_empty() || closing.is_comment() {
            return true;
        }

        if is_import_line(trimmed) || trimmed.ends_with(CONTINUATION_CHARS) {
            return true;
        }

        oracle::classify(logical.text()) == Completeness::Incomplete
    }

    /// Builds the final run at end of input, dropping trailing blank and
    /// comment lines.
    fn flush(&self, begin: usize) -> LogicalLine<'a> {
        let mut end = self.lines.len();
        while end > begin + 1 && is_inert(&self.lines[end - 1]) {
            end -= 1;
        }
        debug!(
            "End of input flushed lines {}..={}",
            begin + 1,
            end
        );
        LogicalLine::new(&self.lines[begin..end])
    }
}

fn is_inert(line: &SourceLine) -> bool {
    line.is_blank() || line.is_comment()
}

impl<'a> Iterator for LogicalLineResolver<'a> {
    type Item = LogicalLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.lines;
        let mut start: Option<usize> = None;

        while let Some(line) = lines.get(self.cursor) {
            let index = self.cursor;
            self.cursor += 1;

            let begin = if let Some(begin) = start {
                begin
            } else {
                if self.skip_exempt(line) {
                    continue;
                }
                start = Some(index);
                index
            };

            let logical = LogicalLine::new(&lines[begin..=index]);
            if Self::continues(&logical) {
                continue;
            }

            debug!("Logical line closed at lines {}..={}", begin + 1, index + 1);
            return Some(logical);
        }

        start.map(|begin| self.flush(begin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(content: &str) -> Vec<(usize, usize, String)> {
        let lines = SourceLine::from_text(content);
        LogicalLineResolver::new(&lines)
            .map(|l| {
                (
                    l.lines()[0].index,
                    l.closing_line().index,
                    l.text().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn single_lines_close_on_their_own() {
        assert_eq!(
            resolve("print(1)\nprint(2)"),
            vec![
                (0, 0, "print(1)".to_string()),
                (1, 1, "print(2)".to_string())
            ]
        );
    }

    #[test]
    fn blank_lines_are_inert() {
        assert_eq!(resolve("\n   \n\n"), vec![]);
        assert_eq!(resolve("\nx\n").len(), 1);
    }

    #[test]
    fn open_brackets_continue() {
        let lines = resolve("x = foo(\n    1,\n    2\n)");
        assert_eq!(lines.len(), 1);
        assert_eq!((lines[0].0, lines[0].1), (0, 3));
    }

    #[test]
    fn continuation_characters_continue() {
        let lines = resolve("x = 1;\ny = 2;\nprint(x)\nz");
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].0, lines[0].1), (0, 2));
        assert_eq!((lines[1].0, lines[1].1), (3, 3));
    }

    #[test]
    fn imports_continue_regardless_of_ending() {
        let lines = resolve("import os\nfrom a import bb as abcdeff\nx");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].1, 2);
    }

    #[test]
    fn blank_and_comment_lines_do_not_close_a_run() {
        let lines = resolve("x = 1;\n\n# note\ny");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].1, 3);
    }

    #[test]
    fn end_of_input_flushes_without_trailing_blanks() {
        let lines = resolve("x = 1;\ny = 2;\n\n# done\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].1, 1);
    }

    #[test]
    fn block_comment_bodies_are_skipped() {
        let content = "'''\nanything goes here\neval(x)\n'''\nx";
        let lines = resolve(content);
        assert_eq!(lines, vec![(4, 4, "x".to_string())]);
    }

    #[test]
    fn block_comment_toggle_is_idempotent_per_pair() {
        let source = SourceLine::from_text("\"\"\"\nbody\n\"\"\"");
        let mut resolver = LogicalLineResolver::new(&source);
        assert!(resolver.next().is_none());
        assert!(!resolver.in_block_comment());
    }

    #[test]
    fn one_line_docstring_does_not_open_a_block() {
        let source = SourceLine::from_text("\"\"\"Module doc.\"\"\"\nx");
        let mut resolver = LogicalLineResolver::new(&source);
        let line = resolver.next().map(|l| l.closing_line().index);
        assert_eq!(line, Some(1));
        assert!(!resolver.in_block_comment());
    }

    #[test]
    fn comment_lines_between_runs_are_skipped() {
        assert_eq!(resolve("# eval(x)\nx"), vec![(1, 1, "x".to_string())]);
    }

    #[test]
    fn invalid_text_closes_the_run() {
        let lines = resolve("x = = 1\ny");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn fresh_resolver_per_source() {
        let open = SourceLine::from_text("'''\nstill open");
        let mut first = LogicalLineResolver::new(&open);
        assert!(first.next().is_none());
        assert!(first.in_block_comment());

        let other = SourceLine::from_text("x");
        assert_eq!(LogicalLineResolver::new(&other).count(), 1);
    }
}
