//! Lexical environment threaded through the rewrite.

use proc_macro2::Ident;
use smallvec::SmallVec;
use syn::visit::{self, Visit};
use syn::{FnArg, Pat, PatIdent, Signature};

use crate::error::{Result, RewriteError};

/// Prefix of identifiers the rewriter introduces on its own.
pub const HIDDEN_PREFIX: &str = "__donotation";

/// Names visible to a continuation, outermost binding first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    names: Vec<Ident>,
    /// Subset of `names` bound with `mut`.
    mutable: Vec<Ident>,
}

impl Scope {
    /// Initial scope: the receiver and every name bound by the parameter list.
    pub fn from_signature(sig: &Signature) -> Result<Self> {
        let mut names = Vec::new();
        let mut mutable = Vec::new();
        for input in &sig.inputs {
            match input {
                FnArg::Receiver(recv) => names.push(Ident::new("self", recv.self_token.span)),
                FnArg::Typed(typed) => {
                    names.extend(pattern_idents(&typed.pat));
                    mutable.extend(mutable_idents(&typed.pat));
                }
            }
        }
        check_reserved(&names)?;
        Ok(Self { names, mutable })
    }

    pub fn names(&self) -> &[Ident] {
        &self.names
    }

    pub fn mutable(&self) -> &[Ident] {
        &self.mutable
    }

    /// New scope with the names bound by `pat` added. A rebound name shadows
    /// the older one, mutability included.
    pub fn with_pattern(&self, pat: &Pat) -> Result<Self> {
        let bound = pattern_idents(pat);
        check_reserved(&bound)?;
        let fresh = |name: &&Ident| !bound.contains(*name);

        let mut names: Vec<Ident> = self.names.iter().filter(fresh).cloned().collect();
        names.extend(bound.iter().cloned());
        let mut mutable: Vec<Ident> = self.mutable.iter().filter(fresh).cloned().collect();
        mutable.extend(mutable_idents(pat));
        Ok(Self { names, mutable })
    }
}

/// Identifiers bound by a pattern, left to right.
pub fn pattern_idents(pat: &Pat) -> SmallVec<[Ident; 2]> {
    collect(pat, |_| true)
}

/// Identifiers a pattern binds by value with `mut`.
pub fn mutable_idents(pat: &Pat) -> SmallVec<[Ident; 2]> {
    collect(pat, |p| p.mutability.is_some() && p.by_ref.is_none())
}

fn collect(pat: &Pat, keep: fn(&PatIdent) -> bool) -> SmallVec<[Ident; 2]> {
    struct Collector {
        keep: fn(&PatIdent) -> bool,
        found: SmallVec<[Ident; 2]>,
    }

    impl<'ast> Visit<'ast> for Collector {
        fn visit_pat_ident(&mut self, pat: &'ast PatIdent) {
            if (self.keep)(pat) {
                self.found.push(pat.ident.clone());
            }
            visit::visit_pat_ident(self, pat);
        }
    }

    let mut collector = Collector { keep, found: SmallVec::new() };
    collector.visit_pat(pat);
    collector.found
}

fn check_reserved(names: &[Ident]) -> Result<()> {
    match names.iter().find(|name| name.to_string().starts_with(HIDDEN_PREFIX)) {
        Some(ident) => Err(RewriteError::ReservedName { ident: ident.clone() }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn names(scope: &Scope) -> Vec<String> {
        scope.names().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn signature_seeds_scope() {
        let sig: Signature = parse_quote!(fn f(&self, a: u32, (b, mut c): (u8, u8)));
        let scope = Scope::from_signature(&sig).unwrap();
        assert_eq!(names(&scope), vec!["self", "a", "b", "c"]);
    }

    #[test]
    fn extending_shadows_older_binding() {
        let sig: Signature = parse_quote!(fn f(x: u32, y: u32));
        let scope = Scope::from_signature(&sig).unwrap();
        let scope = scope.with_pattern(&parse_quote!(x)).unwrap();
        assert_eq!(names(&scope), vec!["y", "x"]);
    }

    #[test]
    fn mutability_follows_the_latest_binding() {
        let sig: Signature = parse_quote!(fn f(mut count: u32, label: &str));
        let scope = Scope::from_signature(&sig).unwrap();
        let mutable: Vec<String> = scope.mutable().iter().map(|n| n.to_string()).collect();
        assert_eq!(mutable, vec!["count"]);

        let scope = scope.with_pattern(&parse_quote!(count)).unwrap();
        assert!(scope.mutable().is_empty());

        let scope = scope.with_pattern(&parse_quote!((mut label, ref mut other))).unwrap();
        let mutable: Vec<String> = scope.mutable().iter().map(|n| n.to_string()).collect();
        assert_eq!(mutable, vec!["label"]);
    }

    #[test]
    fn struct_and_tuple_patterns_collect_all_names() {
        let pat: Pat = parse_quote!(Point { x, y: (a, ref b) });
        let idents: Vec<String> = pattern_idents(&pat).iter().map(|i| i.to_string()).collect();
        assert_eq!(idents, vec!["x", "a", "b"]);
    }

    #[test]
    fn reserved_prefix_is_rejected() {
        let sig: Signature = parse_quote!(fn f(__donotation_value: u32));
        assert!(matches!(
            Scope::from_signature(&sig),
            Err(RewriteError::ReservedName { .. })
        ));
    }
}
