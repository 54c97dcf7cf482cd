//! Statement nodes of the parse tree.

use std::fmt;

use crate::{Name, RpnExpr, Span};

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
///
/// `leer` and `escribir` are ordinary [`StmtKind::Call`]s in the parse
/// tree; the graph builder recognizes them by name.
#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `x <- expr` or `v[i, j] <- expr`
    Assign {
        name: Name,
        /// One index expression per dimension; empty for scalar targets.
        indices: Vec<RpnExpr>,
        value: RpnExpr,
    },

    /// `si … entonces … [sino …] finsi`
    If {
        cond: RpnExpr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },

    /// `mientras cond hacer … finmientras`
    While { cond: RpnExpr, body: Vec<Stmt> },

    /// `hasta cond hacer … finhasta` — enters the body while the condition
    /// is false.
    Until { cond: RpnExpr, body: Vec<Stmt> },

    /// `para i <- e1 hasta e2 hacer … finpara`
    For {
        counter: Name,
        from: RpnExpr,
        to: RpnExpr,
        body: Vec<Stmt>,
    },

    /// `nombre(args)` — user call, `leer`, or `escribir`.
    Call { name: Name, args: Vec<RpnExpr> },

    /// `retornar [expr]`
    Return { value: Option<RpnExpr> },
}
