//! Lexer for PsC using logos with string interning.
//!
//! Source text goes through a raw logos pass first, then raw tokens are
//! converted to [`TokenKind`]s with identifier and string payloads interned.
//! Lexical errors are collected alongside the stream; the stream always ends
//! with an `Eof` token so the parser's cursor never runs off the end.

mod lex_error;
mod raw_token;

#[cfg(test)]
mod tests;

pub use lex_error::{LexError, LexErrorKind};

use logos::Logos;
use psc_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use raw_token::RawToken;

/// Tokenize a source file.
///
/// Always returns a complete `TokenList` (trailing `Eof` included); lexical
/// problems are reported in the error vector rather than aborting the pass.
pub fn tokenize(source: &str, interner: &StringInterner) -> (TokenList, Vec<LexError>) {
    let mut tokens = TokenList::new();
    let mut errors = Vec::new();

    for (result, range) in RawToken::lexer(source).spanned() {
        let span = Span::from_range(range.clone());
        match result {
            Ok(raw) => {
                if let Some(kind) = convert(raw, &source[range], span, interner, &mut errors) {
                    tokens.push(Token::new(kind, span));
                }
            }
            Err(()) => errors.push(LexError {
                span,
                kind: LexErrorKind::InvalidCharacter,
            }),
        }
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
    (tokens, errors)
}

/// Convert a raw token to a `TokenKind`, interning payloads.
///
/// Returns `None` for trivia (comments) and for tokens that turned out to
/// be errors (recorded in `errors`).
fn convert(
    raw: RawToken,
    text: &str,
    span: Span,
    interner: &StringInterner,
    errors: &mut Vec<LexError>,
) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::LineComment => return None,
        RawToken::Newline => TokenKind::Newline,

        RawToken::Int => match text.parse::<i64>() {
            Ok(n) => TokenKind::Int(n),
            Err(_) => {
                errors.push(LexError {
                    span,
                    kind: LexErrorKind::InvalidNumber,
                });
                return None;
            }
        },
        RawToken::Real => match text.parse::<f64>() {
            Ok(x) => TokenKind::Real(x),
            Err(_) => {
                errors.push(LexError {
                    span,
                    kind: LexErrorKind::InvalidNumber,
                });
                return None;
            }
        },
        RawToken::Str => {
            // Strip the surrounding quotes; PsC strings have no escapes.
            let content = &text[1..text.len() - 1];
            TokenKind::Str(interner.intern(content))
        }
        RawToken::UnterminatedStr => {
            errors.push(LexError {
                span,
                kind: LexErrorKind::UnterminatedString,
            });
            return None;
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(text)),

        RawToken::Variables => TokenKind::Variables,
        RawToken::Inicio => TokenKind::Inicio,
        RawToken::Fin => TokenKind::Fin,
        RawToken::Funcion => TokenKind::Funcion,
        RawToken::FinFuncion => TokenKind::FinFuncion,
        RawToken::Procedimiento => TokenKind::Procedimiento,
        RawToken::FinProcedimiento => TokenKind::FinProcedimiento,
        RawToken::Si => TokenKind::Si,
        RawToken::Entonces => TokenKind::Entonces,
        RawToken::Sino => TokenKind::Sino,
        RawToken::FinSi => TokenKind::FinSi,
        RawToken::Mientras => TokenKind::Mientras,
        RawToken::Hacer => TokenKind::Hacer,
        RawToken::FinMientras => TokenKind::FinMientras,
        RawToken::Hasta => TokenKind::Hasta,
        RawToken::FinHasta => TokenKind::FinHasta,
        RawToken::Para => TokenKind::Para,
        RawToken::FinPara => TokenKind::FinPara,
        RawToken::Retornar => TokenKind::Retornar,
        RawToken::Var => TokenKind::Var,
        RawToken::Entero => TokenKind::EnteroType,
        RawToken::RealKw => TokenKind::RealType,
        RawToken::Logico => TokenKind::LogicoType,
        RawToken::Caracter => TokenKind::CaracterType,
        RawToken::Cadena => TokenKind::CadenaType,
        RawToken::Verdadero => TokenKind::Verdadero,
        RawToken::Falso => TokenKind::Falso,
        RawToken::Y => TokenKind::Y,
        RawToken::O => TokenKind::O,
        RawToken::No => TokenKind::No,

        RawToken::Assign => TokenKind::Assign,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Ne => TokenKind::Ne,
        RawToken::Le => TokenKind::Le,
        RawToken::Ge => TokenKind::Ge,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
    };
    Some(kind)
}
