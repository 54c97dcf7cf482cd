//! Lexer tests.

use crate::{tokenize, LexErrorKind};
use pretty_assertions::assert_eq;
use psc_ir::{StringInterner, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize(source, &interner);
    assert_eq!(errors, vec![]);
    tokens.iter().map(|t| t.kind.clone()).collect()
}

#[test]
fn lexes_assignment_line() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize("a <- 2 + 3 * 4\n", &interner);
    assert_eq!(errors, vec![]);
    let a = interner.intern("a");
    let expected = vec![
        TokenKind::Ident(a),
        TokenKind::Assign,
        TokenKind::Int(2),
        TokenKind::Plus,
        TokenKind::Int(3),
        TokenKind::Star,
        TokenKind::Int(4),
        TokenKind::Newline,
        TokenKind::Eof,
    ];
    let actual: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn keywords_are_not_identifiers() {
    assert_eq!(
        kinds("mientras finmientras"),
        vec![
            TokenKind::Mientras,
            TokenKind::FinMientras,
            TokenKind::Eof
        ]
    );
}

#[test]
fn accented_spellings_accepted() {
    assert_eq!(
        kinds("función lógico carácter"),
        vec![
            TokenKind::Funcion,
            TokenKind::LogicoType,
            TokenKind::CaracterType,
            TokenKind::Eof
        ]
    );
}

#[test]
fn single_letter_logical_keywords_beat_identifiers() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize("p y q o r", &interner);
    assert_eq!(errors, vec![]);
    let actual: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        actual,
        vec![
            TokenKind::Ident(interner.intern("p")),
            TokenKind::Y,
            TokenKind::Ident(interner.intern("q")),
            TokenKind::O,
            TokenKind::Ident(interner.intern("r")),
            TokenKind::Eof
        ]
    );
    // Longer words starting with the same letters stay identifiers.
    let (tokens, errors) = tokenize("yo oro", &interner);
    assert_eq!(errors, vec![]);
    assert_eq!(tokens[0].kind, TokenKind::Ident(interner.intern("yo")));
    assert_eq!(tokens[1].kind, TokenKind::Ident(interner.intern("oro")));
}

#[test]
fn comments_are_trivia() {
    assert_eq!(
        kinds("fin // esto se ignora"),
        vec![TokenKind::Fin, TokenKind::Eof]
    );
}

#[test]
fn string_literal_is_interned_without_quotes() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize("\"hola\"", &interner);
    assert_eq!(errors, vec![]);
    match &tokens[0].kind {
        TokenKind::Str(name) => assert_eq!(interner.lookup(*name), "hola"),
        other => panic!("expected string token, got {other:?}"),
    }
}

#[test]
fn real_and_int_literals() {
    assert_eq!(
        kinds("3.14 42"),
        vec![TokenKind::Real(3.14), TokenKind::Int(42), TokenKind::Eof]
    );
}

#[test]
fn comparison_symbols() {
    assert_eq!(
        kinds("<> <= >= < > ="),
        vec![
            TokenKind::Ne,
            TokenKind::Le,
            TokenKind::Ge,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Eq,
            TokenKind::Eof
        ]
    );
}

#[test]
fn unterminated_string_is_reported() {
    let interner = StringInterner::new();
    let (_, errors) = tokenize("\"sin cierre\n", &interner);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexErrorKind::UnterminatedString);
}

#[test]
fn invalid_character_is_reported() {
    let interner = StringInterner::new();
    let (tokens, errors) = tokenize("a ¿ b", &interner);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexErrorKind::InvalidCharacter);
    // Lexing continues past the bad character.
    assert_eq!(tokens.len(), 3); // a, b, eof
}

#[test]
fn overflowing_integer_is_reported() {
    let interner = StringInterner::new();
    let (_, errors) = tokenize("99999999999999999999999", &interner);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexErrorKind::InvalidNumber);
}
