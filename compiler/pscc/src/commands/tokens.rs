//! The `tokens` command: dump the token stream (debugging aid).

use psc_diagnostic::Diagnostic;
use psc_ir::{StringInterner, TokenKind};

use super::{emit_all, read_file};

pub fn tokens_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let (tokens, errors) = psc_lexer::tokenize(&source, &interner);

    for token in &tokens {
        let text = match &token.kind {
            TokenKind::Ident(name) | TokenKind::Str(name) => interner.lookup(*name),
            _ => "",
        };
        println!(
            "{:>5}..{:<5} {} {}",
            token.span.start, token.span.end, token.kind, text
        );
    }

    if !errors.is_empty() {
        let diagnostics: Vec<Diagnostic> =
            errors.into_iter().map(psc_lexer::LexError::into_diagnostic).collect();
        emit_all(path, &source, &diagnostics);
        std::process::exit(1);
    }
}
