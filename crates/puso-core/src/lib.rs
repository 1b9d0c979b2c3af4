//! # puso-core
//!
//! Logical-line resolution and rule enforcement for Python sources.
//!
//! This crate holds everything between "here are the physical lines of a
//! file" and "here is the first style violation in it":
//!
//! - [`oracle`] answers whether text is a complete, truncated or malformed
//!   run of Python statements
//! - [`LogicalLineResolver`] groups physical lines into [`LogicalLine`]s
//! - [`splitter`] cuts a logical line into independent [`Statement`]s
//! - [`Rule`] is implemented by every check; [`Engine`] runs them in order
//!   under a [`RulePolicy`] and stops at the first [`StyleViolation`]
//!
//! ## Example
//!
//! ```ignore
//! use puso_core::{Engine, RulePolicy};
//!
//! let engine = Engine::builder()
//!     .rule(MyRule::new())
//!     .policy(RulePolicy::all())
//!     .build();
//!
//! engine.check_text("script.py", "x = 1;\n")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod engine;
mod policy;
mod report;
mod resolver;
mod rule;
mod source;
mod types;

pub mod oracle;
pub mod splitter;

/// Lexical helpers shared by the resolver and rule implementations.
pub mod utils;

pub use config::{Config, ConfigError, RuleConfig};
pub use context::ProgramContext;
pub use engine::{Engine, EngineBuilder};
pub use oracle::Completeness;
pub use policy::{PolicyMode, RulePolicy};
pub use report::ViolationDiagnostic;
pub use resolver::LogicalLineResolver;
pub use rule::{Rule, RuleBox};
pub use source::{LogicalLine, SourceLine, Statement};
pub use splitter::Fragment;
pub use types::{Category, Finding, StyleViolation};
