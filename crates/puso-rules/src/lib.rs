//! # puso-rules
//!
//! Built-in style rules for puso.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PS001 | `single-statement` | Restricts the program to one line of separator-joined statements |
//! | PS002 | `no-whitespace` | Forbids whitespace characters anywhere in the program |
//! | PS003 | `no-dynamic-eval` | Forbids `eval`, `exec` and `compile` |
//! | PS004 | `import-style` | Requires `from module import member as alias` |
//! | PS005 | `import-gating` | Forbids imports other than the checker itself |
//! | PS006 | `require-terminator` | Requires every statement line to end with a terminator |
//!
//! ## Usage
//!
//! ```ignore
//! use puso_core::Engine;
//! use puso_rules::{ImportStyle, RequireTerminator};
//!
//! let engine = Engine::builder()
//!     .rule(ImportStyle::new())
//!     .rule(RequireTerminator::new())
//!     .build();
//! engine.check_text("main.py", "x = 1;")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod import_gating;
mod import_style;
mod imports;
mod no_dynamic_eval;
mod no_whitespace;
mod presets;
mod require_terminator;
mod single_statement;

pub use import_gating::ImportGating;
pub use import_style::ImportStyle;
pub use no_dynamic_eval::NoDynamicEval;
pub use no_whitespace::NoWhitespace;
pub use presets::{all_rules, Preset};
pub use require_terminator::RequireTerminator;
pub use single_statement::SingleStatement;

/// Re-export core types for convenience.
pub use puso_core::{Category, Finding, Rule, StyleViolation};
