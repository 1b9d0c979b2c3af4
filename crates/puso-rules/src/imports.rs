//! Import statements found anywhere in a parsed statement.

use puso_core::oracle;
use rustpython_parser::ast::{self, Stmt};

/// Parses `text` and returns every `import` / `from ... import` statement in
/// it, nested ones included, in source order.
///
/// Returns `None` when `text` does not parse.
pub(crate) fn parse_imports(text: &str) -> Option<Vec<Stmt>> {
    let suite = oracle::parse_statements(text).ok()?;
    let mut found = Vec::new();
    collect(suite, &mut found);
    Some(found)
}

fn collect(stmts: Vec<Stmt>, found: &mut Vec<Stmt>) {
    for stmt in stmts {
        match stmt {
            Stmt::Import(_) | Stmt::ImportFrom(_) => found.push(stmt),
            Stmt::FunctionDef(ast::StmtFunctionDef { body, .. })
            | Stmt::AsyncFunctionDef(ast::StmtAsyncFunctionDef { body, .. })
            | Stmt::ClassDef(ast::StmtClassDef { body, .. })
            | Stmt::With(ast::StmtWith { body, .. })
            | Stmt::AsyncWith(ast::StmtAsyncWith { body, .. }) => collect(body, found),
            Stmt::If(ast::StmtIf { body, orelse, .. })
            | Stmt::While(ast::StmtWhile { body, orelse, .. })
            | Stmt::For(ast::StmtFor { body, orelse, .. })
            | Stmt::AsyncFor(ast::StmtAsyncFor { body, orelse, .. }) => {
                collect(body, found);
                collect(orelse, found);
            }
            Stmt::Try(ast::StmtTry {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            })
            | Stmt::TryStar(ast::StmtTryStar {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            }) => {
                collect(body, found);
                for ast::ExceptHandler::ExceptHandler(handler) in handlers {
                    collect(handler.body, found);
                }
                collect(orelse, found);
                collect(finalbody, found);
            }
            Stmt::Match(ast::StmtMatch { cases, .. }) => {
                for case in cases {
                    collect(case.body, found);
                }
            }
            _ => {}
        }
    }
}
