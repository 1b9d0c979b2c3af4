//! Utility functions for rule implementations.

pub mod lexical;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use lexical::{
    block_comment_delimiter, find_call, is_import_line, leading_whitespace, matching_close,
    starts_with_keyword,
};
