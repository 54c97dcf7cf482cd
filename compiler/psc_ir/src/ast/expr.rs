//! Postfix (reverse-Polish) expression representation.
//!
//! The shunting-yard parser emits expressions directly in evaluation order,
//! so the back end walks elements left to right against an operand stack
//! and never consults precedence again.

use std::fmt;

use crate::{Name, Span, Value};

/// A flattened expression in postfix order.
///
/// Invariant: evaluating the elements left to right against an operand
/// stack leaves exactly one value on the stack.
pub type RpnExpr = Vec<ExprElem>;

/// One operand-or-operator element of a postfix expression.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprElem {
    /// Literal operand.
    Literal(Value),
    /// Variable invocation: scalar load, or array load when `indices` is
    /// non-empty (one index expression per declared dimension).
    Load {
        name: Name,
        indices: Vec<RpnExpr>,
        span: Span,
    },
    /// User-function invocation. Arguments are full postfix expressions in
    /// declared parameter order.
    Call {
        name: Name,
        args: Vec<RpnExpr>,
        span: Span,
    },
    /// Unary operator: pops one operand, pushes the result.
    Unary(UnaryOp),
    /// Binary operator: pops two operands, pushes the result.
    Binary(BinaryOp),
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Arithmetic negation: `-x`
    Neg,
    /// Logical negation: `no x`
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => f.write_str("-"),
            UnaryOp::Not => f.write_str("no"),
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// Binding strength for the shunting-yard parser. Higher binds tighter.
    /// All binary operators are left-associative.
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 5,
        }
    }

    /// Source symbol, for error messages.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "y",
            BinaryOp::Or => "o",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
