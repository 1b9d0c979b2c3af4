//! # puso
//!
//! Python User Sanity Obliterator: a fail-fast style verifier for Python
//! source. A check stops at the first violation and reports exactly one.
//!
//! This is the facade crate that re-exports the core engine and the
//! built-in rules, and wires a [`Config`] into a ready [`Engine`].
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use puso::{check_source, Config};
//!
//! let config = Config::parse("preset = \"standard\"")?;
//! match check_source("main.py", "x = 1\n", &config) {
//!     Ok(()) => {}
//!     Err(puso::CheckError::Violation(v)) => eprintln!("{}", v.render("main.py")),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! preset = "gated"
//! deny = ["require-terminator"]
//!
//! [rules.import-gating]
//! self_module = "mylib"
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use puso_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use puso_rules::*;
}

mod runner;

pub use runner::{check_file, check_source, engine_from_config, resolve_preset, CheckError};
