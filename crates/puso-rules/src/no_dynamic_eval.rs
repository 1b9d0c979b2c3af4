//! Rule forbidding dynamic code execution.
//!
//! # Rationale
//!
//! `eval`, `exec` and `compile` run code the rest of the checks never see.
//! The default check is textual: the primitive's name followed by `(`
//! anywhere in the statement is a violation, including inside string
//! literals, comments and longer identifiers. False positives are accepted.
//!
//! # Configuration
//!
//! - `experimental_structural`: also walk the parsed statement for
//!   references that dodge the textual match, such as `f = eval` or
//!   `builtins.exec`, re-parsing string constants as code up to
//!   [`MAX_UNWRAP_ROUNDS`] times (default: false)

use puso_core::oracle;
use puso_core::utils::find_call;
use puso_core::{Category, Finding, Rule, Statement};
use rustpython_parser::ast::{self, Constant, Expr, Stmt};
use tracing::debug;

/// Rule code for no-dynamic-eval.
pub const CODE: &str = "PS003";

/// Rule name for no-dynamic-eval.
pub const NAME: &str = "no-dynamic-eval";

/// Dynamic-execution primitives.
pub const DENIED: &[&str] = &["eval", "exec", "compile"];

/// Upper bound on string re-parsing in structural mode.
pub const MAX_UNWRAP_ROUNDS: usize = 8;

/// Forbids calls to dynamic-execution primitives.
#[derive(Debug, Clone, Default)]
pub struct NoDynamicEval {
    /// Enable the structural check on top of the textual one.
    pub experimental_structural: bool,
}

impl NoDynamicEval {
    /// Creates a new rule with the textual check only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the structural check.
    #[must_use]
    pub fn experimental_structural(mut self, enabled: bool) -> Self {
        self.experimental_structural = enabled;
        self
    }
}

impl Rule for NoDynamicEval {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids eval, exec and compile"
    }

    fn check_statement(&self, stmt: &Statement<'_>) -> Option<Finding> {
        let hit = DENIED
            .iter()
            .copied()
            .find(|name| find_call(stmt.text, name).is_some())
            .or_else(|| {
                self.experimental_structural
                    .then(|| structural_hit(stmt.text))
                    .flatten()
            })?;

        Some(Finding::new(
            Category::BannedConstruct,
            stmt.line,
            stmt.column,
            format!("{hit} is not permitted"),
        ))
    }
}

/// Walks the parsed text for denied names, re-parsing string constants
/// found along the way. Text that does not parse is not unwrapped further.
fn structural_hit(text: &str) -> Option<&'static str> {
    let mut pending = vec![text.to_string()];

    for round in 0..MAX_UNWRAP_ROUNDS {
        if pending.is_empty() {
            return None;
        }
        let mut walker = Walker::default();
        for source in pending.drain(..) {
            if let Ok(suite) = oracle::parse_statements(&source) {
                walker.stmts(&suite);
            }
            if walker.hit.is_some() {
                debug!("Structural eval match after {} rounds", round + 1);
                return walker.hit;
            }
        }
        pending = walker.strings;
    }

    debug!("Stopped unwrapping after {} rounds", MAX_UNWRAP_ROUNDS);
    None
}

#[derive(Default)]
struct Walker {
    hit: Option<&'static str>,
    strings: Vec<String>,
}

impl Walker {
    fn name(&mut self, name: &str) {
        if self.hit.is_none() {
            self.hit = DENIED.iter().copied().find(|d| *d == name);
        }
    }

    fn stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(ast::StmtExpr { value, .. }) => self.expr(value),
            Stmt::Assign(ast::StmtAssign { targets, value, .. }) => {
                self.exprs(targets);
                self.expr(value);
            }
            Stmt::AugAssign(ast::StmtAugAssign { value, .. }) => self.expr(value),
            Stmt::AnnAssign(ast::StmtAnnAssign { value, .. })
            | Stmt::Return(ast::StmtReturn { value, .. }) => {
                if let Some(value) = value {
                    self.expr(value);
                }
            }
            Stmt::If(ast::StmtIf {
                test, body, orelse, ..
            })
            | Stmt::While(ast::StmtWhile {
                test, body, orelse, ..
            }) => {
                self.expr(test);
                self.stmts(body);
                self.stmts(orelse);
            }
            Stmt::For(ast::StmtFor {
                iter, body, orelse, ..
            }) => {
                self.expr(iter);
                self.stmts(body);
                self.stmts(orelse);
            }
            Stmt::With(ast::StmtWith { items, body, .. }) => {
                for item in items {
                    self.expr(&item.context_expr);
                }
                self.stmts(body);
            }
            Stmt::FunctionDef(ast::StmtFunctionDef { body, .. })
            | Stmt::ClassDef(ast::StmtClassDef { body, .. }) => self.stmts(body),
            Stmt::Import(ast::StmtImport { names, .. })
            | Stmt::ImportFrom(ast::StmtImportFrom { names, .. }) => {
                for alias in names {
                    self.name(alias.name.as_str());
                }
            }
            _ => {}
        }
    }

    fn exprs(&mut self, exprs: &[Expr]) {
        for expr in exprs {
            self.expr(expr);
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Name(ast::ExprName { id, .. }) => self.name(id.as_str()),
            Expr::Attribute(ast::ExprAttribute { value, attr, .. }) => {
                self.name(attr.as_str());
                self.expr(value);
            }
            Expr::Call(ast::ExprCall {
                func,
                args,
                keywords,
                ..
            }) => {
                self.expr(func);
                self.exprs(args);
                for keyword in keywords {
                    self.expr(&keyword.value);
                }
            }
            Expr::Constant(ast::ExprConstant {
                value: Constant::Str(text),
                ..
            }) => self.strings.push(text.clone()),
            Expr::BinOp(ast::ExprBinOp { left, right, .. }) => {
                self.expr(left);
                self.expr(right);
            }
            Expr::UnaryOp(ast::ExprUnaryOp { operand, .. }) => self.expr(operand),
            Expr::BoolOp(ast::ExprBoolOp { values, .. }) => self.exprs(values),
            Expr::Compare(ast::ExprCompare {
                left, comparators, ..
            }) => {
                self.expr(left);
                self.exprs(comparators);
            }
            Expr::List(ast::ExprList { elts, .. })
            | Expr::Tuple(ast::ExprTuple { elts, .. })
            | Expr::Set(ast::ExprSet { elts, .. }) => self.exprs(elts),
            Expr::Subscript(ast::ExprSubscript { value, slice, .. }) => {
                self.expr(value);
                self.expr(slice);
            }
            Expr::IfExp(ast::ExprIfExp {
                test, body, orelse, ..
            }) => {
                self.expr(test);
                self.expr(body);
                self.expr(orelse);
            }
            Expr::NamedExpr(ast::ExprNamedExpr { value, .. })
            | Expr::Await(ast::ExprAwait { value, .. })
            | Expr::Starred(ast::ExprStarred { value, .. }) => self.expr(value),
            Expr::Lambda(ast::ExprLambda { body, .. }) => self.expr(body),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puso_core::{LogicalLine, SourceLine};

    fn check(rule: &NoDynamicEval, source: &str) -> Option<Finding> {
        let lines = SourceLine::from_text(source);
        let logical = LogicalLine::new(&lines);
        logical
            .statements()
            .iter()
            .find_map(|stmt| rule.check_statement(stmt))
    }

    #[test]
    fn plain_code_passes() {
        assert!(check(&NoDynamicEval::new(), "x = evaluate;").is_none());
        assert!(check(&NoDynamicEval::new(), "print(1 + 2)").is_none());
    }

    #[test]
    fn textual_call_is_reported_at_statement_start() {
        let finding = check(&NoDynamicEval::new(), "x = 1; y = eval ('2')").expect("violation");
        assert_eq!(finding.category, Category::BannedConstruct);
        assert_eq!(finding.column, 7);
        assert_eq!(finding.message, "eval is not permitted");
    }

    #[test]
    fn textual_match_is_over_broad() {
        let rule = NoDynamicEval::new();
        assert!(check(&rule, "print('exec(1)')").is_some());
        assert!(check(&rule, "x = my_compile(1)").is_some());
        assert!(check(&rule, "x = 1  # eval(x)").is_some());
    }

    #[test]
    fn structural_mode_catches_aliases() {
        let source = "f = eval";
        assert!(check(&NoDynamicEval::new(), source).is_none());

        let rule = NoDynamicEval::new().experimental_structural(true);
        let finding = check(&rule, source).expect("violation");
        assert_eq!(finding.message, "eval is not permitted");
        assert!(check(&rule, "g = builtins.exec").is_some());
    }

    #[test]
    fn structural_mode_unwraps_strings() {
        let rule = NoDynamicEval::new().experimental_structural(true);
        assert!(check(&rule, r#"run("f = compile")"#).is_some());
        assert!(check(&rule, "run('x = 1')").is_none());
    }

    #[test]
    fn unwrapping_is_bounded() {
        let mut text = String::from("eval");
        for _ in 0..MAX_UNWRAP_ROUNDS + 2 {
            text = format!("{text:?}");
        }
        assert!(structural_hit(&text).is_none());
        assert_eq!(structural_hit("\"'eval'\""), Some("eval"));
    }
}
