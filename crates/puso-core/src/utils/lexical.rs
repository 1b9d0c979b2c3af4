//! Small lexical predicates over Python source text.
//!
//! These work on raw text without the oracle. They are used where a decision
//! has to be made before (or instead of) parsing: block-comment toggling,
//! import prefixes, bracket wrapping and the textual call ban.

/// Keywords that open an import statement.
pub const IMPORT_KEYWORDS: &[&str] = &["import", "from"];

/// Triple-quote delimiters that open and close a block comment.
pub const BLOCK_COMMENT_DELIMITERS: &[&str] = &["'''", "\"\"\""];

/// Returns true if `text` starts with `keyword` as a whole word.
///
/// ```ignore
/// assert!(starts_with_keyword("import os", "import"));
/// assert!(!starts_with_keyword("importlib", "import"));
/// ```
#[must_use]
pub fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_prefix(keyword)
        .is_some_and(|rest| rest.chars().next().map_or(true, char::is_whitespace))
}

/// Returns true if the trimmed line starts with an import keyword.
///
/// `from` may be glued to a relative module (`from.pkg import x`).
#[must_use]
pub fn is_import_line(trimmed: &str) -> bool {
    trimmed.starts_with("from.")
        || IMPORT_KEYWORDS
            .iter()
            .any(|kw| starts_with_keyword(trimmed, kw))
}

/// Returns the block-comment delimiter the trimmed line starts with, if any.
#[must_use]
pub fn block_comment_delimiter(trimmed: &str) -> Option<&'static str> {
    BLOCK_COMMENT_DELIMITERS
        .iter()
        .copied()
        .find(|d| trimmed.starts_with(d))
}

/// Byte length of the leading whitespace run of `text`.
#[must_use]
pub fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Finds the byte index of the bracket closing the one at `open`.
///
/// String literals are skipped so quoted brackets do not count. Returns
/// `None` if `open` is not an opening bracket or it is never closed.
#[must_use]
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if !matches!(bytes.get(open), Some(b'(' | b'[' | b'{')) {
        return None;
    }

    let mut stack: Vec<u8> = Vec::new();
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => stack.push(b')'),
            b'[' => stack.push(b']'),
            b'{' => stack.push(b'}'),
            b')' | b']' | b'}' => {
                if stack.pop() != Some(bytes[i]) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(i);
                }
            }
            quote @ (b'\'' | b'"') => i = skip_string(bytes, i, quote)?,
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Returns the index of the closing quote of the string starting at `start`.
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let triple = bytes.get(start..start + 3) == Some(&[quote, quote, quote][..]);
    let mut i = if triple { start + 3 } else { start + 1 };
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == quote => {
                if !triple {
                    return Some(i);
                }
                if bytes.get(i..i + 3) == Some(&[quote, quote, quote][..]) {
                    return Some(i + 2);
                }
            }
            b'\n' if !triple => return None,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Finds the first textual call of `name`: the name followed by optional
/// whitespace and an opening parenthesis.
///
/// The match is purely textual. It also fires inside longer identifiers and
/// inside string literals or comments.
#[must_use]
pub fn find_call(text: &str, name: &str) -> Option<usize> {
    text.match_indices(name).map(|(i, _)| i).find(|&i| {
        text[i + name.len()..]
            .trim_start()
            .starts_with('(')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_prefix_is_word_bounded() {
        assert!(starts_with_keyword("import os", "import"));
        assert!(starts_with_keyword("from\tx import y", "from"));
        assert!(starts_with_keyword("import", "import"));
        assert!(!starts_with_keyword("importlib.reload(m)", "import"));
        assert!(!starts_with_keyword("fromage = 1", "from"));
    }

    #[test]
    fn import_lines() {
        assert!(is_import_line("import os"));
        assert!(is_import_line("from os import path as os_path_module"));
        assert!(is_import_line("from.os import path"));
        assert!(!is_import_line("x = 1"));
    }

    #[test]
    fn delimiters() {
        assert_eq!(block_comment_delimiter("'''"), Some("'''"));
        assert_eq!(block_comment_delimiter("\"\"\"doc"), Some("\"\"\""));
        assert_eq!(block_comment_delimiter("x = '''"), None);
    }

    #[test]
    fn matching_close_skips_strings() {
        assert_eq!(matching_close("(a)", 0), Some(2));
        assert_eq!(matching_close("(')')", 0), Some(4));
        assert_eq!(matching_close("(a)(b)", 0), Some(2));
        assert_eq!(matching_close("([)]", 0), None);
        assert_eq!(matching_close("(a", 0), None);
        assert_eq!(matching_close("a", 0), None);
    }

    #[test]
    fn find_call_is_textual() {
        assert_eq!(find_call("eval(x)", "eval"), Some(0));
        assert_eq!(find_call("y = eval (x)", "eval"), Some(4));
        assert_eq!(find_call("my_eval(x)", "eval"), Some(3));
        assert_eq!(find_call("print('exec(1)')", "exec"), Some(7));
        assert_eq!(find_call("evaluate = 1", "eval"), None);
        assert_eq!(find_call("x.eval", "eval"), None);
    }

    #[test]
    fn leading_whitespace_counts_bytes() {
        assert_eq!(leading_whitespace("  x"), 2);
        assert_eq!(leading_whitespace("\tx"), 1);
        assert_eq!(leading_whitespace("x"), 0);
    }
}
