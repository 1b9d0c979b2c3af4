//! Statement splitter.
//!
//! A logical line may hold several statements joined by [`SEPARATOR`] or by
//! line breaks. The line is parsed once and a candidate boundary is only
//! accepted in the gaps between its top-level statements, outside comments.
//! Separators inside strings, brackets and compound-statement bodies never
//! fall in a gap, so they split nothing.

use std::ops::Range;

use crate::oracle;

/// The statement separator.
pub const SEPARATOR: char = ';';

/// A slice of split text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Fragment text as it appears in the source.
    pub raw: &'a str,
    /// Byte offset of `raw` in the split text.
    pub start: usize,
    /// `raw` with surrounding whitespace removed.
    pub text: &'a str,
    /// Boundary character that ended this fragment; `None` for the last one.
    pub boundary: Option<char>,
}

impl<'a> Fragment<'a> {
    fn new(raw: &'a str, start: usize, boundary: Option<char>) -> Self {
        Self {
            raw,
            start,
            text: raw.trim(),
            boundary,
        }
    }

    /// Byte offset of the trimmed text in the split text.
    #[must_use]
    pub fn text_start(&self) -> usize {
        self.start + (self.raw.len() - self.raw.trim_start().len())
    }

    /// Width in bytes of the leading whitespace run of `raw`.
    #[must_use]
    pub fn leading_whitespace(&self) -> usize {
        self.raw.len() - self.raw.trim_start().len()
    }
}

/// Splits `text` into fragments at every accepted boundary.
///
/// Text that is not complete on its own is returned as a single fragment.
#[must_use]
pub fn split(text: &str) -> Vec<Fragment<'_>> {
    // Blanks left after a separator would read as an unexpected indent.
    let body = text.trim_start_matches([' ', '\t']);
    let indent = text.len() - body.len();
    let Some(spans) = oracle::statement_spans(body) else {
        return vec![Fragment::new(text, 0, None)];
    };

    let mut fragments = Vec::new();
    let mut start = 0;

    for gap in gaps(&spans, body.len()) {
        let offset = indent + gap.start;
        for (pos, ch) in boundaries(&body[gap]) {
            let at = offset + pos;
            fragments.push(Fragment::new(&text[start..at], start, Some(ch)));
            start = at + ch.len_utf8();
        }
    }

    fragments.push(Fragment::new(&text[start..], start, None));
    fragments
}

/// Rejoins fragments with the boundaries they were split on.
#[must_use]
pub fn join(fragments: &[Fragment<'_>]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        out.push_str(fragment.raw);
        if let Some(boundary) = fragment.boundary {
            out.push(boundary);
        }
    }
    out
}

/// Stretches of text before, between and after the statement spans.
fn gaps(spans: &[Range<usize>], len: usize) -> Vec<Range<usize>> {
    let mut gaps = Vec::with_capacity(spans.len() + 1);
    let mut end = 0;
    for span in spans {
        gaps.push(end..span.start);
        end = span.end;
    }
    gaps.push(end..len);
    gaps
}

/// Separators and logical newlines in a gap, skipping comments and
/// backslash continuations.
fn boundaries(gap: &str) -> Vec<(usize, char)> {
    let mut found = Vec::new();
    let mut in_comment = false;
    let mut escaped = false;

    for (pos, ch) in gap.char_indices() {
        match ch {
            '\n' if escaped => {}
            '\n' => {
                in_comment = false;
                found.push((pos, ch));
            }
            SEPARATOR if !in_comment => found.push((pos, ch)),
            '#' => in_comment = true,
            _ => {}
        }
        escaped = ch == '\\' && !in_comment;
    }
    found
}
