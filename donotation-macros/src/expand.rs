//! Attribute expansion: parse, classify, rewrite, synthesize.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ItemFn, Result};

use crate::classify::{classify_block, Position};
use crate::codegen;
use crate::config::Config;
use crate::rewrite::{self, Scope};

/// Expand `#[do_notation(attr)] item`.
///
/// Configuration errors surface before the function body is looked at.
pub fn expand(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let config = Config::from_attr(attr)?;
    let func: ItemFn = syn::parse2(item)?;

    let scope = Scope::from_signature(&func.sig)?;
    let body = classify_block(&func.block, Position::Tail)?;
    let tree = rewrite::rewrite_body(&body, &scope)?;

    #[cfg(feature = "show-ir")]
    eprintln!("[donotation] {} rewritten:\n{:#?}", func.sig.ident, tree);

    let rendered = codegen::render(&tree, &config);
    let ItemFn { attrs, vis, sig, .. } = func;
    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            #rendered
        }
    };

    #[cfg(feature = "show-expansion")]
    eprintln!("[donotation] {}", expanded);

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_body_and_keeps_signature() {
        let out = expand(
            quote!(),
            quote! {
                #[inline]
                pub fn add(a: Option<u32>, b: Option<u32>) -> Option<u32> {
                    let x = bind!(a);
                    let y = bind!(b);
                    Some(x + y)
                }
            },
        )
        .unwrap();
        let expected = quote! {
            #[inline]
            pub fn add(a: Option<u32>, b: Option<u32>) -> Option<u32> {
                a.flat_map(move |x| { b.flat_map(move |y| { Some(x + y) }) })
            }
        };
        assert_eq!(out.to_string(), expected.to_string());
    }

    #[test]
    fn method_with_receiver_expands() {
        let out = expand(
            quote!(method = and_then),
            quote! {
                fn get(&self, k: u8) -> Option<u8> {
                    let v = bind!(self.lookup(k));
                    Some(v)
                }
            },
        )
        .unwrap();
        let expected = quote! {
            fn get(&self, k: u8) -> Option<u8> {
                self.lookup(k).and_then(move |v| { Some(v) })
            }
        };
        assert_eq!(out.to_string(), expected.to_string());
    }

    #[test]
    fn configuration_conflict_fails_first() {
        // the body is also invalid, but the attribute is checked before it
        let err = expand(
            quote!(method = flat_map, callback = bind),
            quote! { fn f() { for i in 0..3 { bind!(g(i)); } } },
        )
        .unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn bind_in_loop_is_a_compile_error() {
        let err = expand(
            quote!(),
            quote! {
                fn f(xs: Vec<u8>) -> Option<u8> {
                    for x in xs {
                        let y = bind!(check(x));
                    }
                    None
                }
            },
        )
        .unwrap_err();
        let messages: Vec<String> = err.into_iter().map(|e| e.to_string()).collect();
        assert!(messages[0].contains("cannot be used inside a `for` loop"));
        assert_eq!(messages[1], "enclosing `for` loop is here");
    }

    #[test]
    fn non_function_item_is_rejected() {
        assert!(expand(quote!(), quote!(struct S;)).is_err());
    }
}
