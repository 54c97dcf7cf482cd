//! Runtime errors.
//!
//! These cover defects in the *program being run*: bad indices, division
//! by zero, operand kinds no arithmetic applies to. Defects in the graph
//! itself (stack underflow, unknown callee) are toolchain bugs and panic
//! instead.

use psc_diagnostic::ErrorCode;
use thiserror::Error;

/// Which bound an index violated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoundsViolation {
    /// Index below 1 (indexing is 1-based).
    BelowLowerBound,
    /// Index above the declared dimension size.
    AboveUpperBound,
}

/// A runtime error. Any of these moves the evaluator into its error
/// state; the run cannot continue.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    #[error(
        "indice {bad_index} fuera de rango en la dimension {dimension} de `{name}` (declarada {dimensions:?})"
    )]
    OutOfBounds {
        name: String,
        /// The offending index value, as evaluated.
        bad_index: i64,
        /// 1-based position of the violated dimension.
        dimension: usize,
        /// The declared dimension vector.
        dimensions: Vec<u32>,
        reason: BoundsViolation,
    },

    #[error("division por cero")]
    DivisionByZero,

    #[error("operandos invalidos para `{op}`: {detail}")]
    InvalidOperands { op: String, detail: String },
}

impl EvalError {
    /// Diagnostic code for rendering.
    pub const fn code(&self) -> ErrorCode {
        match self {
            EvalError::OutOfBounds { .. } => ErrorCode::E6001,
            EvalError::DivisionByZero => ErrorCode::E6002,
            EvalError::InvalidOperands { .. } => ErrorCode::E6003,
        }
    }
}
