//! Attribute arguments: which bind strategy to emit.
//!
//! - `#[do_notation]` - `source.flat_map(continuation)`
//! - `#[do_notation(method = and_then)]` - any method name (ident or string)
//! - `#[do_notation(callback = path::to::bind)]` - `bind(source, continuation)`
//! - `#[do_notation(move = false)]` - continuations borrow their captures

use proc_macro2::{Ident, Span, TokenStream};
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, LitBool, LitStr, Path, Result, Token};

/// Method name used when no strategy is given.
pub const DEFAULT_METHOD: &str = "flat_map";

/// How a bind node becomes a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// `source.method(continuation)`
    Method(Ident),
    /// `callback(source, continuation)`
    Callback(Path),
}

/// Whether continuations are `move` closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Move,
    Borrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub strategy: Strategy,
    pub capture: Capture,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::Method(Ident::new(DEFAULT_METHOD, Span::call_site())),
            capture: Capture::Move,
        }
    }
}

impl Config {
    pub fn from_attr(attr: TokenStream) -> Result<Self> {
        syn::parse2(attr)
    }
}

/// One `key = value` argument.
enum Arg {
    Method { key: Ident, name: Ident },
    Callback { key: Ident, path: Path },
    Move { key: Span, value: bool },
}

impl Arg {
    fn span(&self) -> Span {
        match self {
            Arg::Method { key, .. } | Arg::Callback { key, .. } => key.span(),
            Arg::Move { key, .. } => *key,
        }
    }
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(Token![move]) {
            let token: Token![move] = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: LitBool = input.parse()?;
            return Ok(Arg::Move { key: token.span, value: value.value });
        }

        let key = input.call(Ident::parse_any)?;
        if key == "method" {
            input.parse::<Token![=]>()?;
            let name = parse_method_name(input)?;
            Ok(Arg::Method { key, name })
        } else if key == "callback" {
            input.parse::<Token![=]>()?;
            let path: Path = input.parse()?;
            Ok(Arg::Callback { key, path })
        } else {
            Err(Error::new(
                key.span(),
                format!("unknown argument `{}`; expected `method`, `callback` or `move`", key),
            ))
        }
    }
}

/// `method = and_then` or `method = "and_then"`.
fn parse_method_name(input: ParseStream) -> Result<Ident> {
    if input.peek(LitStr) {
        let lit: LitStr = input.parse()?;
        if lit.value().is_empty() {
            return Err(Error::new(lit.span(), "method name cannot be empty"));
        }
        return lit
            .parse::<Ident>()
            .map_err(|_| Error::new(lit.span(), format!("`{}` is not a valid method name", lit.value())));
    }
    input.parse()
}

impl Parse for Config {
    fn parse(input: ParseStream) -> Result<Self> {
        let args = Punctuated::<Arg, Token![,]>::parse_terminated(input)?;

        let mut strategy: Option<(Strategy, Span)> = None;
        let mut capture: Option<Capture> = None;

        for arg in args {
            let span = arg.span();
            match arg {
                Arg::Method { name, .. } => set_strategy(&mut strategy, Strategy::Method(name), span)?,
                Arg::Callback { path, .. } => set_strategy(&mut strategy, Strategy::Callback(path), span)?,
                Arg::Move { value, .. } => {
                    if capture.is_some() {
                        return Err(Error::new(span, "`move` given more than once"));
                    }
                    capture = Some(if value { Capture::Move } else { Capture::Borrow });
                }
            }
        }

        let defaults = Config::default();
        Ok(Config {
            strategy: strategy.map(|(s, _)| s).unwrap_or(defaults.strategy),
            capture: capture.unwrap_or(defaults.capture),
        })
    }
}

fn set_strategy(slot: &mut Option<(Strategy, Span)>, new: Strategy, span: Span) -> Result<()> {
    match slot {
        None => {
            *slot = Some((new, span));
            Ok(())
        }
        Some((Strategy::Method(_), _)) if matches!(new, Strategy::Method(_)) => {
            Err(Error::new(span, "`method` given more than once"))
        }
        Some((Strategy::Callback(_), _)) if matches!(new, Strategy::Callback(_)) => {
            Err(Error::new(span, "`callback` given more than once"))
        }
        Some(_) => Err(Error::new(
            span,
            "`method` and `callback` are mutually exclusive; pick one bind strategy",
        )),
    }
}
