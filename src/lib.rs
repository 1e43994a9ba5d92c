//! donotation - do-notation for Rust
//!
//! # Overview
//!
//! Write a chain of monadic binds as straight-line code. Every
//! `let x = bind!(m);` is a suspension point: everything after it becomes the
//! continuation passed to `m.flat_map(..)`. The rewrite happens at compile
//! time; the expanded function is ordinary nested closures.
//!
//! # Quick Start
//!
//! ```
//! use donotation::prelude::*;
//!
//! #[do_notation]
//! fn add(a: Option<u32>, b: Option<u32>) -> Option<u32> {
//!     let x = bind!(a);
//!     let y = bind!(b);
//!     Some(x + y)
//! }
//!
//! assert_eq!(add(Some(1), Some(2)), Some(3));
//! assert_eq!(add(Some(1), None), None);
//! ```
//!
//! # Syntax
//!
//! | Form | Meaning |
//! |------|---------|
//! | `let PAT = bind!(m);` | bind the value inside `m` to `PAT` for the rest of the body |
//! | `bind!(m);` | sequence `m`, discard its value |
//! | trailing `bind!(m)` | `m` is the result |
//! | `if c { .. } else { .. }` | arms may bind; both continue into the rest of the body |
//! | `return m;` | `m` is the result, later statements are dropped |
//! | `for` / `while` / `loop` | allowed, but a `bind!` inside one is a compile error |
//!
//! # Bind strategies
//!
//! | Attribute | Emitted call |
//! |-----------|--------------|
//! | `#[do_notation]` | `m.flat_map(move \|x\| ..)` |
//! | `#[do_notation(method = and_then)]` | `m.and_then(move \|x\| ..)` |
//! | `#[do_notation(callback = path)]` | `path(m, move \|x\| ..)` |
//! | `#[do_notation(move = false)]` | continuations borrow instead of move |
//!
//! `method` and `callback` are mutually exclusive.
//!
//! ```
//! use donotation::prelude::*;
//!
//! #[do_notation(method = and_then)]
//! fn parse_sum(a: &str, b: &str) -> Result<i64, std::num::ParseIntError> {
//!     let x = bind!(a.parse::<i64>());
//!     let y = bind!(b.parse::<i64>());
//!     Ok(x + y)
//! }
//!
//! assert_eq!(parse_sum("2", "40"), Ok(42));
//! assert!(parse_sum("2", "forty").is_err());
//! ```
//!
//! # Loops
//!
//! A bind chain is finite and fixed at compile time, so it cannot repeat.
//! Suspension points inside loops are rejected:
//!
//! ```compile_fail
//! use donotation::prelude::*;
//!
//! #[do_notation]
//! fn sum(xs: Vec<Option<u32>>) -> Option<u32> {
//!     let mut total = 0;
//!     for x in xs {
//!         let v = bind!(x);
//!         total += v;
//!     }
//!     Some(total)
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// ============================================================
// Modules
// ============================================================

mod ext;
mod macros;

// ============================================================
// Re-exports
// ============================================================

pub use donotation_macros::do_notation;
pub use ext::FlatMap;

#[doc(hidden)]
pub use donotation_macros;

/// Everything needed to write `#[do_notation]` functions.
pub mod prelude {
    pub use crate::bind;
    pub use crate::do_notation;
    pub use crate::FlatMap;
}
