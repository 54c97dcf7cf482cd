//! Semantic error types.

use psc_diagnostic::{Diagnostic, ErrorCode};
use psc_ir::Span;

/// A declarator or decorator error with code, message, and location.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SemaError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Secondary location, e.g. a first declaration site.
    pub label: Option<(Span, String)>,
    /// Free-standing hint rendered after the snippet.
    pub note: Option<String>,
}

impl SemaError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        SemaError {
            code,
            message: message.into(),
            span,
            label: None,
            note: None,
        }
    }

    /// Point at a related location.
    #[must_use]
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.label = Some((span, message.into()));
        self
    }

    /// Attach a hint.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Convert into a renderable diagnostic.
    pub fn into_diagnostic(self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.code, self.message, self.span);
        if let Some((span, message)) = self.label {
            diagnostic = diagnostic.with_label(span, message);
        }
        if let Some(note) = self.note {
            diagnostic = diagnostic.with_note(note);
        }
        diagnostic
    }
}
