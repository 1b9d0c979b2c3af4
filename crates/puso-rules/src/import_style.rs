//! Rule enforcing the aliased `from ... import ... as ...` form.
//!
//! # Rationale
//!
//! Every imported member must be renamed, the rename must differ from the
//! member, and (by default) it must be at least twice as long as the module
//! and member names together. Bare `import module` is rejected outright.
//!
//! # Configuration
//!
//! - `require_alias_length`: enforce the minimum alias length (default: true)

use puso_core::{Category, Finding, Rule, Statement};
use rustpython_parser::ast::{self, Stmt};

use crate::imports;

/// Rule code for import-style.
pub const CODE: &str = "PS004";

/// Rule name for import-style.
pub const NAME: &str = "import-style";

/// Requires aliased `from ... import` statements.
#[derive(Debug, Clone)]
pub struct ImportStyle {
    /// Enforce the minimum alias length.
    pub require_alias_length: bool,
}

impl Default for ImportStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportStyle {
    /// Creates a new rule with the alias length requirement on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            require_alias_length: true,
        }
    }

    /// Sets whether the minimum alias length is enforced.
    #[must_use]
    pub fn require_alias_length(mut self, require: bool) -> Self {
        self.require_alias_length = require;
        self
    }

    /// Checks one parsed import, mapping node offsets through `stmt`.
    fn check_import(&self, import: &Stmt, stmt: &Statement<'_>) -> Option<Finding> {
        match import {
            Stmt::Import(ast::StmtImport { range, .. }) => {
                let (line, column) = stmt.position(range.start().into());
                Some(Finding::new(
                    Category::Import,
                    line,
                    column,
                    "deprecated syntax; please use from...import instead",
                ))
            }
            Stmt::ImportFrom(ast::StmtImportFrom {
                module,
                names,
                level,
                ..
            }) => {
                // Relative dots count towards the module name.
                let module_len = level.as_ref().map_or(0, ast::Int::to_usize)
                    + module.as_ref().map_or(0, |m| m.as_str().chars().count());

                names.iter().find_map(|alias| {
                    let asname = alias.asname.as_ref().map(ast::Identifier::as_str);
                    let message = self.check_alias(alias.name.as_str(), asname, module_len)?;
                    let (line, column) = stmt.position(alias.range.start().into());
                    Some(Finding::new(Category::Import, line, column, message))
                })
            }
            _ => None,
        }
    }

    fn check_alias(&self, member: &str, alias: Option<&str>, module_len: usize) -> Option<String> {
        let Some(alias) = alias else {
            return Some("imported member must be aliased".to_string());
        };
        if alias == member {
            return Some("alias cannot be the same as member name".to_string());
        }
        let min = 2 * (module_len + member.chars().count());
        if self.require_alias_length && alias.chars().count() < min {
            return Some(format!("alias must be {min} characters or longer"));
        }
        None
    }
}

impl Rule for ImportStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires `from module import member as alias` with a distinct, long alias"
    }

    fn check_statement(&self, stmt: &Statement<'_>) -> Option<Finding> {
        imports::parse_imports(stmt.text)?
            .iter()
            .find_map(|import| self.check_import(import, stmt))
    }
}
