//! Lexer error types.
//!
//! Errors are collected, not thrown: lexing always produces a full token
//! stream plus the list of problems found along the way.

use psc_diagnostic::{Diagnostic, ErrorCode};
use psc_ir::Span;

/// A lexical error with its location.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexError {
    /// WHERE the error occurred.
    pub span: Span,
    /// WHAT went wrong.
    pub kind: LexErrorKind,
}

impl LexError {
    /// Convert into a renderable diagnostic.
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.kind.code(), self.kind.message(), self.span)
    }
}

/// What kind of lexical error occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LexErrorKind {
    /// A character no token starts with.
    InvalidCharacter,
    /// Missing closing `"` before end of line.
    UnterminatedString,
    /// Number literal out of range for `entero`.
    InvalidNumber,
}

impl LexErrorKind {
    /// Diagnostic code for rendering.
    pub const fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::InvalidCharacter => ErrorCode::E0001,
            LexErrorKind::UnterminatedString => ErrorCode::E0002,
            LexErrorKind::InvalidNumber => ErrorCode::E0003,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &'static str {
        match self {
            LexErrorKind::InvalidCharacter => "caracter no reconocido",
            LexErrorKind::UnterminatedString => "cadena sin cerrar",
            LexErrorKind::InvalidNumber => "literal numerico invalido",
        }
    }
}
