//! Intermediate representation shared by the classifier, the rewriter and codegen.
//!
//! ## Input side
//!
//! - `Statement` - one classified statement of the function body
//! - `Block` - statements in execution order
//!
//! ## Output side
//!
//! - `ExprTree` - nested bind calls, conditionals and terminal returns
//! - `BindNode` - "invoke bind on `source` with a continuation over `pat`"
//!
//! Every `BindAssign` of the input ends up in exactly one `BindNode`; an
//! `ExprTree` never contains a residual suspension point.

use std::fmt;

use proc_macro2::Ident;
use smallvec::SmallVec;
use syn::{Expr, Pat, Stmt};

/// Loop construct flavor, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    For,
    While,
    Loop,
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoopKind::For => "for",
            LoopKind::While => "while",
            LoopKind::Loop => "loop",
        };
        f.write_str(s)
    }
}

/// A classified statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Ordinary statement executed for effect (or a `let` without `bind!`).
    Plain(Stmt),
    /// `let PAT = bind!(source);` or `bind!(source);`
    BindAssign { pat: Pat, source: Expr },
    /// `if test { then } else { else }` with a suspension point in at least one arm.
    Conditional {
        test: Expr,
        then_block: Block,
        else_block: Block,
    },
    /// `return expr;` or a trailing expression in tail position.
    Return(Expr),
    /// `for`/`while`/`loop`. Kept whole; the loop guard inspects `stmt`.
    Loop { kind: LoopKind, stmt: Stmt },
    /// Items, non-bind macro statements, `let ... else`.
    Other(Stmt),
}

/// Ordered statement list. Order is execution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Statement>,
}

impl Block {
    pub fn new(stmts: Vec<Statement>) -> Self {
        Self { stmts }
    }
}

/// One bind invocation with its continuation.
#[derive(Debug, Clone, PartialEq)]
pub struct BindNode {
    /// Value-producing expression the bind is invoked on.
    pub source: Expr,
    /// Continuation parameter pattern, as written by the user.
    pub pat: Pat,
    /// Names bound by `pat`, left to right.
    pub params: SmallVec<[Ident; 2]>,
    /// Names the continuation closes over: function parameters plus
    /// everything bound by enclosing binds, outermost first.
    pub captures: Vec<Ident>,
    /// Captured `mut` locals. A continuation may run more than once, and each
    /// run starts from their value at the bind point.
    pub mutable: Vec<Ident>,
    /// What runs once the bound value is available.
    pub body: Box<ExprTree>,
}

/// Rewritten function body.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprTree {
    Bind(BindNode),
    Conditional {
        test: Expr,
        then_tree: Box<ExprTree>,
        else_tree: Box<ExprTree>,
    },
    /// A pass-through statement followed by the rest of the tree.
    Seq { stmt: Stmt, rest: Box<ExprTree> },
    Return(Expr),
    /// Implicit end of the function body.
    End,
}

impl ExprTree {
    pub fn seq(stmt: Stmt, rest: ExprTree) -> Self {
        ExprTree::Seq { stmt, rest: Box::new(rest) }
    }

    /// Number of bind nodes in the tree, counting both arms of conditionals.
    #[cfg(test)]
    pub fn bind_count(&self) -> usize {
        match self {
            ExprTree::Bind(node) => 1 + node.body.bind_count(),
            ExprTree::Conditional { then_tree, else_tree, .. } => {
                then_tree.bind_count() + else_tree.bind_count()
            }
            ExprTree::Seq { rest, .. } => rest.bind_count(),
            ExprTree::Return(_) | ExprTree::End => 0,
        }
    }
}
