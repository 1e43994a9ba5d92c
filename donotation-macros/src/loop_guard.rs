//! Rejects suspension points inside iteration constructs.
//!
//! A bind chain is a finite, statically nested sequence of calls. It has no
//! way to express "run this continuation an unknown number of times", so a
//! `bind!` inside a loop body is a hard error rather than something to
//! compensate for.

use syn::Stmt;

use crate::detect::{self, Found};
use crate::error::{Result, RewriteError, StructuralError};
use crate::ir::LoopKind;

/// Check a loop statement. A loop without suspension points passes through
/// untouched.
pub fn check(kind: LoopKind, stmt: &Stmt) -> Result<()> {
    match detect::find_in_stmt(stmt) {
        None => Ok(()),
        Some(found) => Err(violation(found, kind)),
    }
}

/// Check a pass-through statement that should not carry any suspension point.
pub fn ensure_no_bind(stmt: &Stmt) -> Result<()> {
    match detect::find_in_stmt(stmt) {
        None => Ok(()),
        Some(Found { bind_span, enclosing_loop: Some((kind, loop_span)) }) => {
            Err(StructuralError { kind, loop_span, bind_span }.into())
        }
        Some(Found { bind_span, enclosing_loop: None }) => {
            Err(RewriteError::Misplaced { span: bind_span })
        }
    }
}

fn violation(found: Found, kind: LoopKind) -> RewriteError {
    match found.enclosing_loop {
        Some((nearest, loop_span)) => StructuralError {
            kind: nearest,
            loop_span,
            bind_span: found.bind_span,
        }
        .into(),
        // Only reachable through a `for` header, which runs once
        None => {
            debug_assert_eq!(kind, LoopKind::For);
            RewriteError::Misplaced { span: found.bind_span }
        }
    }
}
