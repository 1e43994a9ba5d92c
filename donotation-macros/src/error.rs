//! Rewrite errors and their conversion into compile errors.

use proc_macro2::{Ident, Span};
use thiserror::Error;

use crate::ir::LoopKind;

/// A suspension point found inside an iteration construct.
#[derive(Debug, Error)]
#[error("`bind!` cannot be used inside a `{kind}` loop: a bind chain cannot repeat, move the loop into a helper that returns a single monadic value")]
pub struct StructuralError {
    pub kind: LoopKind,
    /// Span of the loop keyword expression.
    pub loop_span: Span,
    /// Span of the offending `bind!`.
    pub bind_span: Span,
}

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("`bind!` must be a whole statement: `let PAT = bind!(expr);`, `bind!(expr);` or a trailing `bind!(expr)`")]
    Misplaced { span: Span },

    #[error("`{ident}` is reserved for internal use; choose a different binding name")]
    ReservedName { ident: Ident },

    #[error("`{ident}` is bound inside a conditional that contains `bind!`, and the code after the `if` would see this binding; rename it")]
    ArmBindingLeaks { ident: Ident },

    #[error(transparent)]
    Syntax(#[from] syn::Error),
}

impl From<RewriteError> for syn::Error {
    fn from(err: RewriteError) -> Self {
        let message = err.to_string();
        match err {
            RewriteError::Structural(s) => {
                let mut error = syn::Error::new(s.bind_span, message);
                error.combine(syn::Error::new(
                    s.loop_span,
                    format!("enclosing `{}` loop is here", s.kind),
                ));
                error
            }
            RewriteError::Misplaced { span } => syn::Error::new(span, message),
            RewriteError::ReservedName { ident } | RewriteError::ArmBindingLeaks { ident } => {
                syn::Error::new(ident.span(), message)
            }
            RewriteError::Syntax(e) => e,
        }
    }
}

pub type Result<T, E = RewriteError> = core::result::Result<T, E>;
