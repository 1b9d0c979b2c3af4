//! Grammar oracle backed by `rustpython-parser`.
//!
//! The oracle never hands a syntax tree to the engine. It only answers
//! whether a piece of text is a whole run of statements, a truncated one that
//! more input could finish, or malformed text that no amount of input fixes.
//! Rules may ask for the parsed suite to classify a statement (for example to
//! recognise an import), but they never keep it.

use std::ops::Range;

use rustpython_parser::ast::{self, Ranged};
use rustpython_parser::lexer::LexicalErrorType;
use rustpython_parser::{Parse, ParseError, ParseErrorType};

/// Source path handed to the parser; it only shows up in parser errors.
const ORACLE_PATH: &str = "<puso>";

/// Outcome of asking the oracle about a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Completeness {
    /// The text parses as a sequence of whole statements.
    Complete,
    /// Parsing ran off the end while a bracket, string or block was open.
    Incomplete,
    /// The text is malformed and more input will not repair it.
    Invalid,
}

impl Completeness {
    /// Returns true for [`Completeness::Complete`].
    #[must_use]
    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}

/// Parses `text` as a module body.
///
/// # Errors
///
/// Returns the parser error when the text is not a complete suite.
pub fn parse_statements(text: &str) -> Result<ast::Suite, ParseError> {
    ast::Suite::parse(text, ORACLE_PATH)
}

/// Classifies `text` as complete, incomplete or invalid.
#[must_use]
pub fn classify(text: &str) -> Completeness {
    match parse_statements(text) {
        Ok(_) => Completeness::Complete,
        Err(error) if is_unterminated(&error, text) => Completeness::Incomplete,
        Err(_) => Completeness::Invalid,
    }
}

/// Number of top-level statements in `text`, or `None` when it is not
/// [`Completeness::Complete`].
#[must_use]
pub fn statement_count(text: &str) -> Option<usize> {
    parse_statements(text).ok().map(|suite| suite.len())
}

/// Byte ranges of the top-level statements in `text`, or `None` when it is
/// not [`Completeness::Complete`].
///
/// A decorated definition starts at its first decorator expression.
#[must_use]
pub fn statement_spans(text: &str) -> Option<Vec<Range<usize>>> {
    let suite = parse_statements(text).ok()?;
    Some(suite.iter().map(span).collect())
}

/// Returns true when `text` parses as a single expression.
#[must_use]
pub fn is_expression(text: &str) -> bool {
    ast::Expr::parse(text, ORACLE_PATH).is_ok()
}

fn span(stmt: &ast::Stmt) -> Range<usize> {
    let decorators = match stmt {
        ast::Stmt::FunctionDef(def) => def.decorator_list.as_slice(),
        ast::Stmt::AsyncFunctionDef(def) => def.decorator_list.as_slice(),
        ast::Stmt::ClassDef(def) => def.decorator_list.as_slice(),
        _ => &[],
    };
    let start = decorators
        .iter()
        .map(Ranged::start)
        .fold(stmt.start(), std::cmp::min);
    usize::from(start)..usize::from(stmt.end())
}

fn is_unterminated(error: &ParseError, text: &str) -> bool {
    match &error.error {
        ParseErrorType::Eof | ParseErrorType::Lexical(LexicalErrorType::Eof) => true,
        // A block header with no body yet reports a missing indent at the end
        // of input rather than an EOF.
        ParseErrorType::Lexical(LexicalErrorType::IndentationError) => {
            let offset: usize = error.offset.into();
            offset >= text.trim_end().len()
        }
        _ => false,
    }
}
