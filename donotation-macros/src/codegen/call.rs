//! Bind call emission for both strategies.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::Expr;

use crate::config::{Capture, Config, Strategy};
use crate::detect;
use crate::ir::BindNode;

/// `source.method(continuation)` or `callback(source, continuation)`.
///
/// Generated tokens carry the span of the bound expression so type errors
/// from the bind implementation point at the user's suspension point.
pub fn bind_call(node: &BindNode, body: TokenStream, config: &Config) -> TokenStream {
    let span = node.source.span();
    let pat = &node.pat;
    let source = &node.source;

    let move_kw = match config.capture {
        Capture::Move => quote_spanned!(span=> move),
        Capture::Borrow => TokenStream::new(),
    };
    let fresh = fresh_locals(node, &body);
    let continuation = quote_spanned!(span=> #move_kw |#pat| { #fresh #body });

    match &config.strategy {
        Strategy::Method(method) => {
            let mut method = method.clone();
            method.set_span(span);
            let receiver = receiver(source);
            quote_spanned!(span=> #receiver.#method(#continuation))
        }
        Strategy::Callback(path) => quote_spanned!(span=> #path(#source, #continuation)),
    }
}

/// Shadow every captured `mut` local the body mentions with a clone of the
/// captured value, so writes in one run of the continuation are not seen by
/// the next.
fn fresh_locals(node: &BindNode, body: &TokenStream) -> TokenStream {
    if node.mutable.is_empty() {
        return TokenStream::new();
    }
    let used = detect::idents_in(body.clone());
    node.mutable
        .iter()
        .filter(|name| used.contains(*name))
        .map(|name| {
            quote! {
                #[allow(unused_mut)]
                let mut #name = ::core::clone::Clone::clone(&#name);
            }
        })
        .collect()
}

/// Parenthesize receivers that would otherwise bind looser than `.`.
fn receiver(expr: &Expr) -> TokenStream {
    match expr {
        Expr::Path(_)
        | Expr::Call(_)
        | Expr::MethodCall(_)
        | Expr::Macro(_)
        | Expr::Field(_)
        | Expr::Index(_)
        | Expr::Paren(_)
        | Expr::Lit(_)
        | Expr::Try(_)
        | Expr::Await(_)
        | Expr::Tuple(_)
        | Expr::Array(_) => quote!(#expr),
        _ => quote!((#expr)),
    }
}
