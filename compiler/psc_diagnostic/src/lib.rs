//! Diagnostic system for structured error reporting.
//!
//! Every phase reports problems as [`Diagnostic`]s:
//! - an [`ErrorCode`] for searchability
//! - a clear message (what went wrong)
//! - a primary span (where it went wrong)
//! - labels and notes (why it's wrong)
//!
//! Rendering is the emitter's job; phases never format or print.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::{ColorMode, TerminalEmitter};
pub use error_code::ErrorCode;
