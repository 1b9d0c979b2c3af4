//! Source model: physical lines, logical lines and statements.

use crate::splitter;
use crate::utils::lexical::{block_comment_delimiter, is_import_line, leading_whitespace};

/// One physical line of the source, as loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 0-based line index.
    pub index: usize,
    /// Raw text without the line terminator.
    pub text: String,
}

impl SourceLine {
    /// Creates a new source line.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Splits `content` into source lines.
    ///
    /// Line terminators (`\n` and `\r\n`) are dropped. A trailing terminator
    /// does not produce an extra empty line.
    #[must_use]
    pub fn from_text(content: &str) -> Vec<Self> {
        content
            .lines()
            .enumerate()
            .map(|(index, text)| Self::new(index, text))
            .collect()
    }

    /// The line with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Returns true for empty or whitespace-only lines.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Returns true for lines holding only a `#` comment.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.trimmed().starts_with('#')
    }

    /// Byte length of the indentation.
    #[must_use]
    pub fn indent(&self) -> usize {
        leading_whitespace(&self.text)
    }

    /// Converts a byte column of the raw text into a character column of the
    /// trimmed text. Positions inside the indentation map to 0.
    #[must_use]
    pub fn trimmed_column(&self, raw_byte: usize) -> usize {
        let indent = self.indent();
        let end = raw_byte.min(self.text.len());
        if end <= indent {
            return 0;
        }
        self.text
            .get(indent..end)
            .map_or(0, |slice| slice.chars().count())
    }
}

/// A run of contiguous physical lines forming one syntactic unit.
///
/// The joined text is dedented by the indentation of the first line so that
/// the oracle sees a block nested inside a function the same way it sees a
/// top-level one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine<'a> {
    lines: &'a [SourceLine],
    text: String,
    /// Bytes removed from the front of each line while dedenting.
    cut: Vec<usize>,
    /// Byte offset of each line's start in `text`.
    starts: Vec<usize>,
}

impl<'a> LogicalLine<'a> {
    /// Builds a logical line from a non-empty run of physical lines.
    #[must_use]
    pub fn new(lines: &'a [SourceLine]) -> Self {
        let base = lines.first().map_or(0, SourceLine::indent);
        let mut text = String::new();
        let mut cut = Vec::with_capacity(lines.len());
        let mut starts = Vec::with_capacity(lines.len());

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            let removed = Some(line.indent().min(base))
                .filter(|&n| line.text.is_char_boundary(n))
                .unwrap_or(0);
            starts.push(text.len());
            cut.push(removed);
            text.push_str(&line.text[removed..]);
        }

        Self {
            lines,
            text,
            cut,
            starts,
        }
    }

    /// The dedented text, physical lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The physical lines in this logical line.
    #[must_use]
    pub fn lines(&self) -> &'a [SourceLine] {
        self.lines
    }

    /// The physical line that closed this logical line.
    #[must_use]
    pub fn closing_line(&self) -> &'a SourceLine {
        &self.lines[self.lines.len() - 1]
    }

    /// Returns true if the closing physical line is an import.
    #[must_use]
    pub fn is_import(&self) -> bool {
        is_import_line(self.closing_line().trimmed())
    }

    /// Returns true if the closing physical line is a block-comment delimiter,
    /// i.e. the run ends by closing a docstring.
    #[must_use]
    pub fn closes_block_comment(&self) -> bool {
        block_comment_delimiter(self.closing_line().trimmed()).is_some()
    }

    /// Maps a byte offset in [`Self::text`] to `(line index, trimmed column)`.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let row = self
            .starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line = &self.lines[row];
        let raw = offset - self.starts[row] + self.cut[row];
        (line.index, line.trimmed_column(raw))
    }

    /// Splits this logical line into statements.
    ///
    /// Fragments that are empty or hold only a comment are dropped.
    #[must_use]
    pub fn statements(&self) -> Vec<Statement<'_>> {
        splitter::split(&self.text)
            .into_iter()
            .filter(|f| !f.text.is_empty() && !f.text.starts_with('#'))
            .map(|f| Statement::new(self, f.text_start(), f.text))
            .collect()
    }
}

/// One independently parseable statement inside a [`LogicalLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    logical: &'a LogicalLine<'a>,
    offset: usize,
    /// Trimmed statement text.
    pub text: &'a str,
    /// 0-based index of the physical line the statement starts on.
    pub line: usize,
    /// Column of the statement start in the trimmed physical line.
    pub column: usize,
}

impl<'a> Statement<'a> {
    fn new(logical: &'a LogicalLine<'a>, offset: usize, text: &'a str) -> Self {
        let (line, column) = logical.position(offset);
        Self {
            logical,
            offset,
            text,
            line,
            column,
        }
    }

    /// Maps a byte offset within [`Self::text`] to `(line index, column)`.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        self.logical.position(self.offset + offset)
    }
}
