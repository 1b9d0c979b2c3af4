//! Rule forbidding imports altogether, except the checker's own module.
//!
//! # Configuration
//!
//! - `self_module`: the one module that may still be imported
//!   (default: `puso`)

use puso_core::utils::starts_with_keyword;
use puso_core::{Category, Finding, Rule, Statement};
use rustpython_parser::ast::{self, Ranged, Stmt};

use crate::imports;

/// Rule code for import-gating.
pub const CODE: &str = "PS005";

/// Rule name for import-gating.
pub const NAME: &str = "import-gating";

/// Default module exempt from the ban.
pub const DEFAULT_SELF_MODULE: &str = "puso";

/// Forbids every import except the configured self-module.
#[derive(Debug, Clone)]
pub struct ImportGating {
    /// Module that may still be imported, with its submodules.
    pub self_module: String,
}

impl Default for ImportGating {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportGating {
    /// Creates a new rule exempting [`DEFAULT_SELF_MODULE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            self_module: DEFAULT_SELF_MODULE.to_string(),
        }
    }

    /// Sets the exempt module.
    #[must_use]
    pub fn self_module(mut self, module: impl Into<String>) -> Self {
        self.self_module = module.into();
        self
    }

    fn is_allowed(&self, module: &str) -> bool {
        module == self.self_module
            || module
                .strip_prefix(self.self_module.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }

    /// Returns true if `import` brings in something other than the
    /// self-module.
    fn is_forbidden(&self, import: &Stmt) -> bool {
        match import {
            Stmt::Import(ast::StmtImport { names, .. }) => {
                names.iter().any(|alias| !self.is_allowed(alias.name.as_str()))
            }
            Stmt::ImportFrom(ast::StmtImportFrom { module, level, .. }) => {
                let relative = level.as_ref().is_some_and(|l| l.to_u32() > 0);
                relative || !module.as_ref().is_some_and(|m| self.is_allowed(m.as_str()))
            }
            _ => false,
        }
    }

    /// Textual fallback for text the oracle rejects.
    fn is_forbidden_text(&self, text: &str) -> bool {
        let trimmed = text.trim_start();
        let rest = if starts_with_keyword(trimmed, "import") {
            &trimmed["import".len()..]
        } else if starts_with_keyword(trimmed, "from") || trimmed.starts_with("from.") {
            &trimmed["from".len()..]
        } else {
            return false;
        };
        let module = rest
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .find(|s| !s.is_empty())
            .unwrap_or_default();
        !self.is_allowed(module)
    }
}

impl Rule for ImportGating {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids imports other than the checker itself"
    }

    fn check_statement(&self, stmt: &Statement<'_>) -> Option<Finding> {
        let (line, column) = match imports::parse_imports(stmt.text) {
            Some(found) => {
                let import = found.iter().find(|import| self.is_forbidden(import))?;
                stmt.position(import.start().into())
            }
            None if self.is_forbidden_text(stmt.text) => (stmt.line, stmt.column),
            None => return None,
        };
        Some(Finding::new(
            Category::Import,
            line,
            column,
            "imports are not permitted",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puso_core::{LogicalLine, SourceLine};

    fn check_with(rule: &ImportGating, source: &str) -> Option<Finding> {
        let lines = SourceLine::from_text(source);
        let logical = LogicalLine::new(&lines);
        logical
            .statements()
            .iter()
            .find_map(|stmt| rule.check_statement(stmt))
    }

    fn check(source: &str) -> Option<Finding> {
        check_with(&ImportGating::new(), source)
    }

    #[test]
    fn self_module_is_allowed() {
        assert!(check("import puso").is_none());
        assert!(check("from puso import run").is_none());
        assert!(check("from puso.core import run as go").is_none());
    }

    #[test]
    fn other_imports_are_rejected() {
        let finding = check("import os").expect("violation");
        assert_eq!(finding.category, Category::Import);
        assert_eq!(finding.message, "imports are not permitted");

        assert!(check("import puso, os").is_some());
        assert!(check("from pusokit import x").is_some());
        assert!(check("from . import x").is_some());
    }

    #[test]
    fn column_points_at_statement() {
        let finding = check("x = 1; import sys").expect("violation");
        assert_eq!((finding.line, finding.column), (0, 7));
    }

    #[test]
    fn configured_module() {
        let rule = ImportGating::new().self_module("mylib");
        assert!(check_with(&rule, "import mylib").is_none());
        assert!(check_with(&rule, "import puso").is_some());
    }

    #[test]
    fn relative_import_without_space() {
        let finding = check("from.os import path;").expect("violation");
        assert_eq!((finding.line, finding.column), (0, 0));
        assert!(check("x = 1; from.os import path as os_path_module;").is_some());
    }

    #[test]
    fn unparseable_import_falls_back_to_text() {
        assert!(check("import os +").is_some());
        assert!(check("import puso +").is_none());
        assert!(check("from.os import path +").is_some());
    }

    #[test]
    fn nested_import_is_rejected() {
        let finding = check("def f():\n    import os").expect("violation");
        assert_eq!((finding.line, finding.column), (1, 0));
    }

    #[test]
    fn nested_parenthesized_import_is_rejected() {
        let source = "if x:\n    from os import (\n        path,\n    );";
        let finding = check(source).expect("violation");
        assert_eq!((finding.line, finding.column), (1, 0));
    }
}
