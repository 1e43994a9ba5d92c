//! Block rewriter: a right-to-left fold over the statements of a block.
//!
//! Each step combines one statement with the tree already built for
//! everything after it. A bind turns that tree into its continuation, which
//! is how every later statement ends up inside the closure.

use proc_macro2::{Ident, Span};
use smallvec::{smallvec, SmallVec};
use syn::{Expr, Pat, PatIdent, Stmt};

use super::branch;
use super::scope::{pattern_idents, Scope, HIDDEN_PREFIX};
use crate::detect;
use crate::error::{Result, RewriteError};
use crate::ir::{BindNode, Block, ExprTree, Statement};
use crate::loop_guard;

/// Rewrite `block` followed by `tail` into a single tree.
///
/// `scope` holds the names visible before the first statement.
pub fn rewrite_block(block: &Block, tail: ExprTree, scope: &Scope) -> Result<ExprTree> {
    // Scopes are only known front to back, the fold runs back to front
    let mut scopes = Vec::with_capacity(block.stmts.len());
    let mut current = scope.clone();
    for stmt in &block.stmts {
        let next = match stmt {
            Statement::BindAssign { pat, .. } => Some(current.with_pattern(pat)?),
            Statement::Plain(Stmt::Local(local)) | Statement::Other(Stmt::Local(local)) => {
                Some(current.with_pattern(&local.pat)?)
            }
            _ => None,
        };
        scopes.push(current);
        current = next.unwrap_or_else(|| scopes[scopes.len() - 1].clone());
    }

    block
        .stmts
        .iter()
        .zip(&scopes)
        .rev()
        .try_fold(tail, |tail, (stmt, scope)| rewrite_statement(stmt, tail, scope))
}

fn rewrite_statement(stmt: &Statement, tail: ExprTree, scope: &Scope) -> Result<ExprTree> {
    match stmt {
        Statement::Plain(s) | Statement::Other(s) => {
            loop_guard::ensure_no_bind(s)?;
            Ok(ExprTree::seq(s.clone(), tail))
        }
        Statement::BindAssign { pat, source } => bind(pat, source, tail, scope),
        Statement::Conditional { test, then_block, else_block } => {
            branch::rewrite_conditional(test, then_block, else_block, tail, scope)
        }
        // Whatever followed the return is unreachable and dropped
        Statement::Return(expr) => {
            no_bind_in(expr)?;
            Ok(ExprTree::Return(expr.clone()))
        }
        Statement::Loop { kind, stmt } => {
            loop_guard::check(*kind, stmt)?;
            Ok(ExprTree::seq(stmt.clone(), tail))
        }
    }
}

fn bind(pat: &Pat, source: &Expr, tail: ExprTree, scope: &Scope) -> Result<ExprTree> {
    no_bind_in(source)?;
    let params = pattern_idents(pat);
    let (pat, params, body) = match tail {
        ExprTree::End => identity(pat, params),
        tail => (pat.clone(), params, tail),
    };
    // The continuation's own parameters are fresh on every call already
    let mutable = scope
        .mutable()
        .iter()
        .filter(|name| !params.contains(*name))
        .cloned()
        .collect();
    Ok(ExprTree::Bind(BindNode {
        source: source.clone(),
        pat,
        params,
        captures: scope.names().to_vec(),
        mutable,
        body: Box::new(body),
    }))
}

/// Continuation for a bind with nothing after it: hand the bound value back.
fn identity(pat: &Pat, params: SmallVec<[Ident; 2]>) -> (Pat, SmallVec<[Ident; 2]>, ExprTree) {
    if let Some(ident) = simple_ident(pat) {
        let value = path_expr(ident.clone());
        return (pat.clone(), params, ExprTree::Return(value));
    }
    let hidden = Ident::new(&format!("{}_value", HIDDEN_PREFIX), Span::call_site());
    let pat = Pat::Ident(PatIdent {
        attrs: Vec::new(),
        by_ref: None,
        mutability: None,
        ident: hidden.clone(),
        subpat: None,
    });
    (pat, smallvec![hidden.clone()], ExprTree::Return(path_expr(hidden)))
}

/// `x`, `mut x` or `x: T`, the shapes whose single binding is the whole value.
fn simple_ident(pat: &Pat) -> Option<&Ident> {
    match pat {
        Pat::Ident(p) if p.by_ref.is_none() && p.subpat.is_none() => Some(&p.ident),
        Pat::Type(p) => simple_ident(&p.pat),
        _ => None,
    }
}

fn path_expr(ident: Ident) -> Expr {
    syn::parse_quote!(#ident)
}

fn no_bind_in(expr: &Expr) -> Result<()> {
    match detect::find_in_expr(expr) {
        Some(found) => Err(RewriteError::Misplaced { span: found.bind_span }),
        None => Ok(()),
    }
}
