//! The statement-tree rewriter.
//!
//! Turns a classified `Block` into one `ExprTree` of nested bind nodes.
//!
//! ## Module Structure
//!
//! - `block` - right-to-left fold over a block (the core algorithm)
//! - `branch` - conditionals: both arms continue into the same tail
//! - `scope` - explicit environment of names each continuation closes over

mod block;
mod branch;
mod scope;

pub use scope::Scope;

use crate::error::Result;
use crate::ir::{Block, ExprTree};

/// Rewrite a whole function body. The tail is the implicit end of the body.
pub fn rewrite_body(body: &Block, scope: &Scope) -> Result<ExprTree> {
    block::rewrite_block(body, ExprTree::End, scope)
}
