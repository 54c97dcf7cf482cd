//! Tokens and token streams.

use std::fmt;
use std::ops::Index;

use crate::{Name, Span, Type};

/// A single token with its source span.
#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds for PsC.
///
/// String and identifier payloads are interned `Name`s; real literals keep
/// the raw `f64` (tokens are never hashed).
#[derive(Clone, PartialEq, Debug)]
pub enum TokenKind {
    /// Integer literal: `42`
    Int(i64),
    /// Real literal: `3.14`
    Real(f64),
    /// String literal (interned, quotes stripped): `"hola"`
    Str(Name),
    /// Identifier (interned)
    Ident(Name),

    // Structure keywords
    Variables,
    Inicio,
    Fin,
    Funcion,
    FinFuncion,
    Procedimiento,
    FinProcedimiento,

    // Statement keywords
    Si,
    Entonces,
    Sino,
    FinSi,
    Mientras,
    Hacer,
    FinMientras,
    Hasta,
    FinHasta,
    Para,
    FinPara,
    Retornar,
    Var,

    // Type keywords
    EnteroType,
    RealType,
    LogicoType,
    CaracterType,
    CadenaType,

    // Literal keywords
    Verdadero,
    Falso,

    // Logical operators (word keywords)
    Y,
    O,
    No,

    // Symbols
    Assign,   // <-
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Comma,    // ,
    Colon,    // :
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Percent,  // %
    Eq,       // =
    Ne,       // <>
    Lt,       // <
    Le,       // <=
    Gt,       // >
    Ge,       // >=

    /// Statement separator.
    Newline,
    /// End of input. The last token of every `TokenList`.
    Eof,
}

impl TokenKind {
    /// Map a type keyword token to its declared type.
    pub const fn as_type(&self) -> Option<Type> {
        match self {
            TokenKind::EnteroType => Some(Type::Entero),
            TokenKind::RealType => Some(Type::Real),
            TokenKind::LogicoType => Some(Type::Logico),
            TokenKind::CaracterType => Some(Type::Caracter),
            TokenKind::CadenaType => Some(Type::Cadena),
            _ => None,
        }
    }

    /// Human-readable description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::Real(_) => "real literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Variables => "`variables`",
            TokenKind::Inicio => "`inicio`",
            TokenKind::Fin => "`fin`",
            TokenKind::Funcion => "`funcion`",
            TokenKind::FinFuncion => "`finfuncion`",
            TokenKind::Procedimiento => "`procedimiento`",
            TokenKind::FinProcedimiento => "`finprocedimiento`",
            TokenKind::Si => "`si`",
            TokenKind::Entonces => "`entonces`",
            TokenKind::Sino => "`sino`",
            TokenKind::FinSi => "`finsi`",
            TokenKind::Mientras => "`mientras`",
            TokenKind::Hacer => "`hacer`",
            TokenKind::FinMientras => "`finmientras`",
            TokenKind::Hasta => "`hasta`",
            TokenKind::FinHasta => "`finhasta`",
            TokenKind::Para => "`para`",
            TokenKind::FinPara => "`finpara`",
            TokenKind::Retornar => "`retornar`",
            TokenKind::Var => "`var`",
            TokenKind::EnteroType => "`entero`",
            TokenKind::RealType => "`real`",
            TokenKind::LogicoType => "`logico`",
            TokenKind::CaracterType => "`caracter`",
            TokenKind::CadenaType => "`cadena`",
            TokenKind::Verdadero => "`verdadero`",
            TokenKind::Falso => "`falso`",
            TokenKind::Y => "`y`",
            TokenKind::O => "`o`",
            TokenKind::No => "`no`",
            TokenKind::Assign => "`<-`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Eq => "`=`",
            TokenKind::Ne => "`<>`",
            TokenKind::Lt => "`<`",
            TokenKind::Le => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::Ge => "`>=`",
            TokenKind::Newline => "end of line",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexed token stream.
///
/// Invariant: the last token is always [`TokenKind::Eof`], so cursor code
/// can index the current position unconditionally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Push a token. The lexer pushes the trailing `Eof` itself.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Last token of the stream, if any. After lexing this is always `Eof`.
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
