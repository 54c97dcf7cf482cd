//! Terminal emitter.
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use psc_ir::Span;

use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` decides; it is ignored otherwise.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Line/column position resolved from a byte offset (both 1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

/// Resolve a byte offset to a 1-based line/column pair.
pub fn line_col(source: &str, offset: u32) -> LineCol {
    let offset = (offset as usize).min(source.len());
    let before = &source[..offset];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = before.rfind('\n').map_or(offset + 1, |nl| offset - nl);
    LineCol { line, column }
}

/// Renders diagnostics in a compact rustc-like format.
pub struct TerminalEmitter {
    use_colors: bool,
}

impl TerminalEmitter {
    pub fn new(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            use_colors: mode.should_use_colors(is_tty),
        }
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.use_colors {
            code
        } else {
            ""
        }
    }

    fn severity_color(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Error => self.paint(colors::ERROR),
            Severity::Warning => self.paint(colors::WARNING),
            Severity::Note => self.paint(colors::NOTE),
        }
    }

    /// Render one diagnostic against its source text.
    pub fn emit(
        &self,
        out: &mut dyn Write,
        file_name: &str,
        source: &str,
        diagnostic: &Diagnostic,
    ) -> io::Result<()> {
        let reset = self.paint(colors::RESET);
        let bold = self.paint(colors::BOLD);
        let sev_color = self.severity_color(diagnostic.severity);

        writeln!(
            out,
            "{sev_color}{}[{}]{reset}{bold}: {}{reset}",
            diagnostic.severity, diagnostic.code, diagnostic.message
        )?;

        let pos = line_col(source, diagnostic.span.start);
        let secondary = self.paint(colors::SECONDARY);
        writeln!(
            out,
            "  {secondary}-->{reset} {file_name}:{}:{}",
            pos.line, pos.column
        )?;

        self.emit_snippet(out, source, diagnostic.span, pos)?;

        for label in &diagnostic.labels {
            let lpos = line_col(source, label.span.start);
            writeln!(
                out,
                "  {secondary}={reset} {file_name}:{}:{}: {}",
                lpos.line, lpos.column, label.message
            )?;
        }
        for note in &diagnostic.notes {
            writeln!(out, "  {secondary}={reset} note: {note}")?;
        }
        Ok(())
    }

    /// Render the offending source line with a caret marker.
    fn emit_snippet(
        &self,
        out: &mut dyn Write,
        source: &str,
        span: Span,
        pos: LineCol,
    ) -> io::Result<()> {
        let Some(line_text) = source.lines().nth(pos.line - 1) else {
            return Ok(());
        };
        let secondary = self.paint(colors::SECONDARY);
        let reset = self.paint(colors::RESET);
        let gutter_width = pos.line.to_string().len();

        writeln!(out, "{secondary}{:gutter_width$} |{reset}", "")?;
        writeln!(
            out,
            "{secondary}{:gutter_width$} |{reset} {line_text}",
            pos.line
        )?;
        let caret_len = (span.len().max(1) as usize).min(line_text.len() + 1 - (pos.column - 1));
        writeln!(
            out,
            "{secondary}{:gutter_width$} |{reset} {}{}{}{reset}",
            "",
            " ".repeat(pos.column - 1),
            self.severity_color(Severity::Error),
            "^".repeat(caret_len.max(1)),
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_col_resolution() {
        let src = "variables\n entero a\ninicio\n";
        assert_eq!(line_col(src, 0), LineCol { line: 1, column: 1 });
        assert_eq!(line_col(src, 10), LineCol { line: 2, column: 1 });
        assert_eq!(line_col(src, 11), LineCol { line: 2, column: 2 });
    }

    #[test]
    fn renders_without_colors() {
        let src = "inicio\n x <- 1\nfin\n";
        let diag = Diagnostic::error(ErrorCode::E2003, "variable no definida: `x`", Span::new(8, 9));
        let emitter = TerminalEmitter::new(ColorMode::Never, false);
        let mut buf = Vec::new();
        emitter
            .emit(&mut buf, "demo.psc", src, &diag)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("error[E2003]"));
        assert!(text.contains("demo.psc:2:2"));
        assert!(text.contains('^'));
    }
}
