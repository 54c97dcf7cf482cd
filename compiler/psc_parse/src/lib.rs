//! Recursive descent parser for PsC.
//!
//! Statements are parsed by recursive descent; expressions go through a
//! shunting-yard pass that emits postfix [`psc_ir::RpnExpr`] sequences
//! directly, so precedence is resolved here once and never again.
//!
//! The parser recovers at line boundaries: a bad statement is recorded and
//! the cursor resynchronizes to the next line, so one typo does not hide
//! the rest of the file.

mod cursor;
mod error;
mod grammar;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::ParseError;

use psc_ir::{SourceProgram, StringInterner, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            errors: Vec::new(),
        }
    }
}

/// Parse a whole token stream into a `SourceProgram`.
///
/// Always returns the modules that parsed cleanly; problems are reported
/// in the error vector.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> (SourceProgram, Vec<ParseError>) {
    Parser::new(tokens, interner).parse_program()
}
