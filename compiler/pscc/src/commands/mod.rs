//! CLI commands.

mod check;
mod run;
mod tokens;

pub use check::check_file;
pub use run::run_file;
pub use tokens::tokens_file;

use std::io::IsTerminal;

use psc_diagnostic::emitter::{ColorMode, TerminalEmitter};
use psc_diagnostic::Diagnostic;
use psc_ir::StringInterner;
use psc_sema::CheckedProgram;

/// Read a source file or exit with a clear message.
fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("error: cannot read '{path}': {error}");
            std::process::exit(1);
        }
    }
}

fn stderr_emitter() -> TerminalEmitter {
    let is_tty = std::io::stderr().is_terminal();
    TerminalEmitter::new(ColorMode::Auto, is_tty)
}

fn emit_all(path: &str, source: &str, diagnostics: &[Diagnostic]) {
    let emitter = stderr_emitter();
    let mut err = std::io::stderr().lock();
    for diagnostic in diagnostics {
        let _ = emitter.emit(&mut err, path, source, diagnostic);
    }
}

/// Run the frontend (tokenize, parse, check), reporting every diagnostic.
///
/// Returns the checked program only when the whole frontend is clean.
fn frontend(path: &str, source: &str, interner: &StringInterner) -> Option<CheckedProgram> {
    let (tokens, lex_errors) = psc_lexer::tokenize(source, interner);
    let (parsed, parse_errors) = psc_parse::parse(&tokens, interner);
    let (checked, sema_errors) = psc_sema::check(parsed, interner);

    let diagnostics: Vec<Diagnostic> = lex_errors
        .into_iter()
        .map(|e| e.into_diagnostic())
        .chain(parse_errors.into_iter().map(psc_parse::ParseError::into_diagnostic))
        .chain(sema_errors.into_iter().map(psc_sema::SemaError::into_diagnostic))
        .collect();

    if diagnostics.is_empty() {
        Some(checked)
    } else {
        emit_all(path, source, &diagnostics);
        None
    }
}
