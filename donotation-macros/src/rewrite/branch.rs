//! Branch rewriter for conditionals.
//!
//! Both arms are rewritten against the same tail so they reconverge on the
//! same remainder of the function. The tail ends up inside each arm's block,
//! so a `let` at the top of an arm would be visible to it. Any arm binding
//! the tail reads is rejected.

use std::collections::HashSet;

use proc_macro2::Ident;
use quote::ToTokens;
use syn::{Expr, Pat, Stmt};

use super::block::rewrite_block;
use super::scope::{pattern_idents, Scope};
use crate::detect;
use crate::error::{Result, RewriteError};
use crate::ir::{Block, ExprTree, Statement};

pub fn rewrite_conditional(
    test: &Expr,
    then_block: &Block,
    else_block: &Block,
    tail: ExprTree,
    scope: &Scope,
) -> Result<ExprTree> {
    // `if let PAT = ..` binds PAT for the then arm only
    let (then_scope, test_pat) = match test {
        Expr::Let(expr_let) => (scope.with_pattern(&expr_let.pat)?, Some(&*expr_let.pat)),
        _ => (scope.clone(), None),
    };

    let read_by_tail = free_names(&tail);
    if !read_by_tail.is_empty() {
        check_arm(then_block, test_pat, &read_by_tail)?;
        check_arm(else_block, None, &read_by_tail)?;
    }

    let then_tree = rewrite_block(then_block, tail.clone(), &then_scope)?;
    let else_tree = rewrite_block(else_block, tail, scope)?;
    Ok(ExprTree::Conditional {
        test: test.clone(),
        then_tree: Box::new(then_tree),
        else_tree: Box::new(else_tree),
    })
}

/// Reject names bound at the top level of `arm` that the tail reads.
fn check_arm(arm: &Block, test_pat: Option<&Pat>, read_by_tail: &HashSet<Ident>) -> Result<()> {
    // An arm that returns never reaches the tail
    if arm.stmts.iter().any(|stmt| matches!(stmt, Statement::Return(_))) {
        return Ok(());
    }
    let arm_pats = arm.stmts.iter().filter_map(|stmt| match stmt {
        Statement::BindAssign { pat, .. } => Some(pat),
        Statement::Plain(Stmt::Local(local)) | Statement::Other(Stmt::Local(local)) => Some(&local.pat),
        _ => None,
    });
    for pat in test_pat.into_iter().chain(arm_pats) {
        if let Some(ident) = pattern_idents(pat).into_iter().find(|i| read_by_tail.contains(i)) {
            return Err(RewriteError::ArmBindingLeaks { ident });
        }
    }
    Ok(())
}

/// Names `tree` reads before binding them itself.
fn free_names(tree: &ExprTree) -> HashSet<Ident> {
    let mut free = HashSet::new();
    collect_free(tree, &HashSet::new(), &mut free);
    free
}

fn collect_free(tree: &ExprTree, bound: &HashSet<Ident>, free: &mut HashSet<Ident>) {
    let mut read = |tokens: proc_macro2::TokenStream, bound: &HashSet<Ident>| {
        free.extend(detect::idents_in(tokens).into_iter().filter(|i| !bound.contains(i)));
    };
    match tree {
        ExprTree::Bind(node) => {
            read(node.source.to_token_stream(), bound);
            let mut inner = bound.clone();
            inner.extend(node.params.iter().cloned());
            collect_free(&node.body, &inner, free);
        }
        ExprTree::Conditional { test, then_tree, else_tree } => {
            read(test.to_token_stream(), bound);
            let mut then_bound = bound.clone();
            if let Expr::Let(expr_let) = test {
                then_bound.extend(pattern_idents(&expr_let.pat));
            }
            collect_free(then_tree, &then_bound, free);
            collect_free(else_tree, bound, free);
        }
        ExprTree::Seq { stmt: Stmt::Local(local), rest } => {
            if let Some(init) = &local.init {
                read(init.expr.to_token_stream(), bound);
                if let Some((_, diverge)) = &init.diverge {
                    read(diverge.to_token_stream(), bound);
                }
            }
            let mut inner = bound.clone();
            inner.extend(pattern_idents(&local.pat));
            collect_free(rest, &inner, free);
        }
        ExprTree::Seq { stmt, rest } => {
            read(stmt.to_token_stream(), bound);
            collect_free(rest, bound, free);
        }
        ExprTree::Return(expr) => read(expr.to_token_stream(), bound),
        ExprTree::End => {}
    }
}
