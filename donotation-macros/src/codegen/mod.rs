//! Synthesizer: renders an `ExprTree` back into Rust tokens.
//!
//! ## Architecture
//!
//! - `call` - one bind node as a method call or a callback call
//!
//! Every tree renders as the contents of a block: pass-through statements
//! first, then a single tail expression (a bind call, an `if`, or a returned
//! value). `End` renders as nothing, so the block evaluates to `()`.

mod call;

use proc_macro2::TokenStream;
use quote::quote;

use crate::config::Config;
use crate::ir::ExprTree;

pub fn render(tree: &ExprTree, config: &Config) -> TokenStream {
    match tree {
        ExprTree::End => TokenStream::new(),
        ExprTree::Return(expr) => quote!(#expr),
        ExprTree::Seq { stmt, rest } => {
            let rest = render(rest, config);
            quote!(#stmt #rest)
        }
        ExprTree::Conditional { test, then_tree, else_tree } => {
            let then_body = render(then_tree, config);
            let else_body = render(else_tree, config);
            quote! {
                if #test { #then_body } else { #else_body }
            }
        }
        ExprTree::Bind(node) => {
            let body = render(&node.body, config);
            call::bind_call(node, body, config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify_block, Position};
    use crate::config::{Capture, Strategy};
    use crate::rewrite::{rewrite_body, Scope};
    use syn::parse_quote;

    fn render_block(block: syn::Block, config: &Config) -> String {
        let classified = classify_block(&block, Position::Tail).unwrap();
        let tree = rewrite_body(&classified, &Scope::default()).unwrap();
        render(&tree, config).to_string()
    }

    #[test]
    fn no_binds_renders_original_statements() {
        let out = render_block(parse_quote!({ let a = 1; log(a); Some(a) }), &Config::default());
        assert_eq!(out, quote!(let a = 1; log(a); Some(a)).to_string());
    }

    #[test]
    fn default_strategy_calls_flat_map() {
        let out = render_block(
            parse_quote!({ let x = bind!(a()); let y = bind!(b(x)); c(y) }),
            &Config::default(),
        );
        let expected = quote! {
            a().flat_map(move |x| { b(x).flat_map(move |y| { c(y) }) })
        };
        assert_eq!(out, expected.to_string());
    }

    #[test]
    fn callback_strategy_passes_source_and_continuation() {
        let config = Config {
            strategy: Strategy::Callback(parse_quote!(my::bind)),
            capture: Capture::Move,
        };
        let out = render_block(parse_quote!({ let x = bind!(a()); c(x) }), &config);
        assert_eq!(out, quote!(my::bind(a(), move |x| { c(x) })).to_string());
    }

    #[test]
    fn borrow_capture_drops_move() {
        let config = Config {
            strategy: Strategy::Method(parse_quote!(and_then)),
            capture: Capture::Borrow,
        };
        let out = render_block(parse_quote!({ let x = bind!(a()); c(x) }), &config);
        assert_eq!(out, quote!(a().and_then(|x| { c(x) })).to_string());
    }

    #[test]
    fn conditional_renders_both_arms_with_shared_tail() {
        let out = render_block(
            parse_quote!({
                let x = bind!(a());
                if x > 0 { let y = bind!(b(x)); } else { note(); }
                done(x)
            }),
            &Config::default(),
        );
        let expected = quote! {
            a().flat_map(move |x| {
                if x > 0 {
                    b(x).flat_map(move |y| { done(x) })
                } else {
                    note(); done(x)
                }
            })
        };
        assert_eq!(out, expected.to_string());
    }

    #[test]
    fn trailing_bind_hands_value_back() {
        let out = render_block(parse_quote!({ bind!(a()); }), &Config::default());
        let expected = quote!(a().flat_map(move |__donotation_value| { __donotation_value }));
        assert_eq!(out, expected.to_string());
    }
}
