//! Detection of `bind!` suspension points inside arbitrary syntax.
//!
//! Closures, `async` blocks and nested items are separate function bodies
//! and are never scanned: a `bind!` in there belongs to nobody and expands
//! to the `bind!` macro's own compile error.

use std::collections::HashSet;

use proc_macro2::{Ident, Span, TokenStream, TokenTree};
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Expr, ExprAsync, ExprClosure, ExprForLoop, ExprLoop, ExprWhile, Item, Macro, Path, Stmt};

use crate::ir::LoopKind;

/// First suspension point found by a scan.
#[derive(Debug, Clone, Copy)]
pub struct Found {
    pub bind_span: Span,
    /// Nearest loop around the suspension point, if any.
    pub enclosing_loop: Option<(LoopKind, Span)>,
}

/// Whether `path` names the `bind!` marker (`bind`, `donotation::bind`, ...).
pub fn is_bind_path(path: &Path) -> bool {
    path.segments
        .last()
        .map(|seg| seg.ident == "bind" && seg.arguments.is_none())
        .unwrap_or(false)
}

/// Return the macro if `expr` is a `bind!(..)` invocation.
pub fn as_bind_macro(expr: &Expr) -> Option<&Macro> {
    match expr {
        Expr::Macro(m) if is_bind_path(&m.mac.path) => Some(&m.mac),
        _ => None,
    }
}

pub fn find_in_stmt(stmt: &Stmt) -> Option<Found> {
    let mut finder = BindFinder::default();
    finder.visit_stmt(stmt);
    finder.found
}

pub fn find_in_expr(expr: &Expr) -> Option<Found> {
    let mut finder = BindFinder::default();
    finder.visit_expr(expr);
    finder.found
}

/// Every identifier mentioned anywhere in `tokens`, including inside groups.
///
/// This is a token-level over-approximation: field names, paths and macro
/// arguments all count.
pub fn idents_in(tokens: TokenStream) -> HashSet<Ident> {
    let mut out = HashSet::new();
    collect_idents(tokens, &mut out);
    out
}

fn collect_idents(tokens: TokenStream, out: &mut HashSet<Ident>) {
    for tt in tokens {
        match tt {
            TokenTree::Ident(ident) => {
                out.insert(ident);
            }
            TokenTree::Group(group) => collect_idents(group.stream(), out),
            TokenTree::Punct(_) | TokenTree::Literal(_) => {}
        }
    }
}

#[derive(Default)]
struct BindFinder {
    enclosing: Option<(LoopKind, Span)>,
    found: Option<Found>,
}

impl BindFinder {
    fn in_loop(&mut self, kind: LoopKind, span: Span, f: impl FnOnce(&mut Self)) {
        let saved = self.enclosing.replace((kind, span));
        f(self);
        self.enclosing = saved;
    }
}

impl<'ast> Visit<'ast> for BindFinder {
    fn visit_macro(&mut self, mac: &'ast Macro) {
        if self.found.is_none() && is_bind_path(&mac.path) {
            self.found = Some(Found {
                bind_span: mac.span(),
                enclosing_loop: self.enclosing,
            });
        }
    }

    fn visit_expr_for_loop(&mut self, e: &'ast ExprForLoop) {
        // The iterator expression runs once, only the body repeats
        self.visit_expr(&e.expr);
        self.in_loop(LoopKind::For, e.for_token.span, |v| v.visit_block(&e.body));
    }

    fn visit_expr_while(&mut self, e: &'ast ExprWhile) {
        self.in_loop(LoopKind::While, e.while_token.span, |v| visit::visit_expr_while(v, e));
    }

    fn visit_expr_loop(&mut self, e: &'ast ExprLoop) {
        self.in_loop(LoopKind::Loop, e.loop_token.span, |v| visit::visit_expr_loop(v, e));
    }

    fn visit_expr_closure(&mut self, _: &'ast ExprClosure) {}

    fn visit_expr_async(&mut self, _: &'ast ExprAsync) {}

    fn visit_item(&mut self, _: &'ast Item) {}
}
