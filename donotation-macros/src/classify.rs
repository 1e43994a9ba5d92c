//! Statement classifier.
//!
//! Maps `syn` statements onto the `Statement` categories the rewriter folds
//! over. Unrecognized shapes classify as `Other` and pass through unchanged.

use syn::{Expr, ExprIf, ExprMacro, Macro, Pat, PatWild, Stmt};

use crate::detect;
use crate::error::{Result, RewriteError};
use crate::ir::{Block, LoopKind, Statement};

/// Whether a block's trailing expression is the value of the whole body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Function body, or an arm of a conditional that is itself in tail position.
    Tail,
    /// Anything else: a trailing expression is evaluated for effect.
    Statement,
}

pub fn classify_block(block: &syn::Block, position: Position) -> Result<Block> {
    let last = block.stmts.len().saturating_sub(1);
    let stmts = block
        .stmts
        .iter()
        .enumerate()
        .map(|(i, stmt)| classify(stmt, position, i == last))
        .collect::<Result<Vec<_>>>()?;
    Ok(Block::new(stmts))
}

/// Classify one statement. `is_last` marks the final statement of its block.
pub fn classify(stmt: &Stmt, position: Position, is_last: bool) -> Result<Statement> {
    // Only a semicolon-less final statement can carry the block's value
    let trailing = is_last && !has_semi(stmt);
    let is_tail = trailing && position == Position::Tail;

    if let Some(mac) = stmt_bind_macro(stmt) {
        let source = bind_source(mac)?;
        return Ok(if is_tail {
            Statement::Return(source)
        } else {
            Statement::BindAssign { pat: wild(), source }
        });
    }

    match stmt {
        Stmt::Local(local) => {
            let Some(init) = &local.init else {
                return Ok(Statement::Plain(stmt.clone()));
            };
            let Some(mac) = detect::as_bind_macro(&init.expr) else {
                return Ok(Statement::Plain(stmt.clone()));
            };
            if init.diverge.is_some() {
                return Err(RewriteError::Misplaced { span: mac_span(mac) });
            }
            Ok(Statement::BindAssign {
                pat: local.pat.clone(),
                source: bind_source(mac)?,
            })
        }
        Stmt::Expr(Expr::Return(ret), _) => Ok(Statement::Return(
            ret.expr.as_deref().cloned().unwrap_or_else(|| syn::parse_quote!(())),
        )),
        Stmt::Expr(Expr::If(expr_if), _) => classify_if(expr_if, is_tail, stmt),
        Stmt::Expr(Expr::ForLoop(_), _) => Ok(loop_stmt(LoopKind::For, stmt, trailing && !is_tail)),
        Stmt::Expr(Expr::While(_), _) => Ok(loop_stmt(LoopKind::While, stmt, trailing && !is_tail)),
        Stmt::Expr(Expr::Loop(_), _) => Ok(loop_stmt(LoopKind::Loop, stmt, trailing && !is_tail)),
        Stmt::Expr(expr, None) if is_tail => Ok(Statement::Return(expr.clone())),
        Stmt::Expr(..) if trailing => Ok(Statement::Plain(with_semi(stmt))),
        Stmt::Expr(..) => Ok(Statement::Plain(stmt.clone())),
        Stmt::Macro(sm) if is_tail => Ok(Statement::Return(Expr::Macro(ExprMacro {
            attrs: sm.attrs.clone(),
            mac: sm.mac.clone(),
        }))),
        Stmt::Macro(_) | Stmt::Item(_) => Ok(Statement::Other(stmt.clone())),
    }
}

fn classify_if(expr_if: &ExprIf, is_tail: bool, stmt: &Stmt) -> Result<Statement> {
    if let Some(found) = detect::find_in_expr(&expr_if.cond) {
        return Err(RewriteError::Misplaced { span: found.bind_span });
    }

    let arms_bind = detect::find_in_expr(&Expr::If(expr_if.clone())).is_some();
    if !arms_bind {
        return Ok(if is_tail {
            Statement::Return(Expr::If(expr_if.clone()))
        } else {
            Statement::Plain(with_semi(stmt))
        });
    }

    let position = if is_tail { Position::Tail } else { Position::Statement };
    let then_block = classify_block(&expr_if.then_branch, position)?;
    let else_block = match &expr_if.else_branch {
        None => Block::default(),
        Some((_, else_expr)) => match else_expr.as_ref() {
            Expr::Block(b) => classify_block(&b.block, position)?,
            Expr::If(nested) => {
                let nested_stmt = Stmt::Expr(else_expr.as_ref().clone(), None);
                Block::new(vec![classify_if(nested, is_tail, &nested_stmt)?])
            }
            // `else` is always followed by a block or another `if`
            other => Block::new(vec![Statement::Plain(Stmt::Expr(other.clone(), Some(Default::default())))]),
        },
    };

    Ok(Statement::Conditional {
        test: expr_if.cond.as_ref().clone(),
        then_block,
        else_block,
    })
}

fn loop_stmt(kind: LoopKind, stmt: &Stmt, needs_semi: bool) -> Statement {
    let stmt = if needs_semi { with_semi(stmt) } else { stmt.clone() };
    Statement::Loop { kind, stmt }
}

/// The `bind!` macro of a `bind!(..);` or trailing `bind!(..)` statement.
fn stmt_bind_macro(stmt: &Stmt) -> Option<&Macro> {
    match stmt {
        Stmt::Macro(sm) if detect::is_bind_path(&sm.mac.path) => Some(&sm.mac),
        Stmt::Expr(expr, _) => detect::as_bind_macro(expr),
        _ => None,
    }
}

fn bind_source(mac: &Macro) -> Result<Expr> {
    if mac.tokens.is_empty() {
        return Err(syn::Error::new(mac_span(mac), "`bind!` expects an expression: `bind!(expr)`").into());
    }
    Ok(mac.parse_body::<Expr>()?)
}

fn mac_span(mac: &Macro) -> proc_macro2::Span {
    syn::spanned::Spanned::span(mac)
}

fn has_semi(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Local(_) | Stmt::Item(_) => true,
        Stmt::Expr(_, semi) => semi.is_some(),
        Stmt::Macro(sm) => sm.semi_token.is_some(),
    }
}

fn with_semi(stmt: &Stmt) -> Stmt {
    match stmt {
        Stmt::Expr(expr, None) => Stmt::Expr(expr.clone(), Some(Default::default())),
        other => other.clone(),
    }
}

fn wild() -> Pat {
    Pat::Wild(PatWild {
        attrs: Vec::new(),
        underscore_token: Default::default(),
    })
}
