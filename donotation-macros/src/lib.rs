//! Proc macros for the donotation crate.
//!
//! `#[do_notation]` rewrites a function body written as a straight line of
//! `let x = bind!(m);` suspension points into nested bind calls:
//!
//! ```text
//! let x = bind!(a);          a.flat_map(move |x| {
//! let y = bind!(b(x));  =>       b(x).flat_map(move |y| { c(y) })
//! c(y)                       })
//! ```
//!
//! ## Pipeline
//!
//! - `config` - attribute arguments to bind strategy
//! - `classify` - `syn` statements to `ir::Statement`
//! - `rewrite` - right-to-left fold into an `ir::ExprTree`
//! - `loop_guard` - suspension points inside loops are rejected
//! - `codegen` - `ExprTree` back to tokens

use proc_macro::TokenStream;

mod classify;
mod codegen;
mod config;
mod detect;
mod error;
mod expand;
mod ir;
mod loop_guard;
mod rewrite;

/// Rewrite a function body of `bind!` suspension points into nested bind calls.
///
/// See the `donotation` crate for the full syntax.
#[proc_macro_attribute]
pub fn do_notation(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand::expand(attr.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
