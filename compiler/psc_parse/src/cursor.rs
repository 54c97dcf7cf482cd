//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use psc_diagnostic::ErrorCode;
use psc_ir::{Name, Span, StringInterner, Token, TokenKind, TokenList};
use tracing::trace;

use crate::ParseError;

/// Cursor for navigating tokens.
///
/// Invariant: the position is always valid (`0..tokens.len()`); the last
/// token is always `Eof`, so `current()` never runs off the end.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    ///
    /// # Panics
    /// Panics if the stream does not end with `Eof` (lexer contract).
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        assert!(
            matches!(
                tokens.last(),
                Some(Token {
                    kind: TokenKind::Eof,
                    ..
                })
            ),
            "token stream must end with Eof"
        );
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    /// Get a reference to the string interner.
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        debug_assert!(self.pos < self.tokens.len(), "cursor position out of bounds");
        &self.tokens[self.pos]
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Check if the cursor is at the end of input.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Advance to the next token (saturating at `Eof`).
    pub fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            trace!(pos = self.pos, kind = ?self.current_kind(), "advance");
            self.pos += 1;
        }
    }

    /// Check whether the current token matches `kind` exactly.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token, requiring it to match `kind`.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(ParseError::new(
                ErrorCode::E1001,
                format!("se esperaba {kind}, se encontro {}", self.current_kind()),
                self.current_span(),
            ))
        }
    }

    /// Consume an identifier, returning its interned name and span.
    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        match *self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.current_span();
                self.advance();
                Ok((name, span))
            }
            ref other => Err(ParseError::new(
                ErrorCode::E1001,
                format!("se esperaba un identificador, se encontro {other}"),
                self.current_span(),
            )),
        }
    }

    /// Require a statement separator: a newline (consumed, along with any
    /// blank lines that follow) or end of input.
    pub fn expect_newline(&mut self) -> Result<(), ParseError> {
        if self.is_at_end() {
            return Ok(());
        }
        if self.check(&TokenKind::Newline) {
            self.skip_newlines();
            return Ok(());
        }
        Err(ParseError::new(
            ErrorCode::E1001,
            format!(
                "se esperaba fin de linea, se encontro {}",
                self.current_kind()
            ),
            self.current_span(),
        ))
    }

    /// Skip any run of newline tokens.
    pub fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skip forward to just past the next newline (error recovery).
    pub fn sync_to_next_line(&mut self) {
        while !self.is_at_end() && !self.check(&TokenKind::Newline) {
            self.advance();
        }
        self.skip_newlines();
    }
}
