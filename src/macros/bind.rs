//! The `bind!` suspension-point marker.

/// Marks a suspension point inside a `#[do_notation]` function.
///
/// `#[do_notation]` consumes every `bind!` it understands:
///
/// - `let PAT = bind!(expr);` binds the value inside `expr`
/// - `bind!(expr);` sequences `expr` and discards its value
/// - a trailing `bind!(expr)` is the result of the body
///
/// The semicolon matters at the end of a body. A trailing `bind!(expr)` is
/// `expr` itself. A final `bind!(expr);` or `let x = bind!(expr);` with
/// nothing after it hands the bound value back as the result, which is
/// `expr.flat_map(|x| x)` and so flattens one level of nesting:
///
/// ```
/// use donotation::prelude::*;
///
/// #[do_notation]
/// fn same(m: Option<u8>) -> Option<u8> {
///     bind!(m)
/// }
///
/// #[do_notation]
/// fn flatten(m: Option<Option<u8>>) -> Option<u8> {
///     bind!(m);
/// }
///
/// assert_eq!(same(Some(1)), Some(1));
/// assert_eq!(flatten(Some(Some(1))), Some(1));
/// assert_eq!(flatten(Some(None)), None);
/// ```
///
/// Anywhere else, including closures, nested functions and the body of a
/// function without the attribute, it is a compile error.
///
/// ```compile_fail
/// use donotation::bind;
///
/// fn plain() -> Option<u8> {
///     let x = bind!(Some(1));
///     Some(x)
/// }
/// ```
#[macro_export]
macro_rules! bind {
    ($($tt:tt)*) => {
        ::core::compile_error!(
            "`bind!` can only be used as a statement directly inside a `#[do_notation]` function: \
             `let x = bind!(expr);`, `bind!(expr);` or a trailing `bind!(expr)`"
        )
    };
}
