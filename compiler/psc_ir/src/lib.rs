//! PsC IR - shared data model for the PsC toolchain.
//!
//! This crate contains the core data structures shared by every phase:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Tokens and `TokenList` for lexer output
//! - The parse tree (postfix expressions, statements, module definitions)
//! - Runtime values and variable tables
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: strings become `Name(u32)` so comparisons and
//!   map lookups are integer operations.
//! - **Postfix expressions**: the parser emits expressions directly in
//!   reverse-Polish order, so the back end never needs precedence
//!   information at run time.

pub mod ast;
mod interner;
mod name;
mod span;
mod token;
mod ty;
mod value;
mod vars;

pub use ast::{
    BinaryOp, Decl, ExprElem, ModuleDef, ModuleKind, Param, RpnExpr, SourceProgram, Stmt, StmtKind,
    UnaryOp,
};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use ty::Type;
pub use value::Value;
pub use vars::{VarTable, Variable};

/// Name of the program entry module.
///
/// The main block of a source file is registered under this name. It is not
/// callable from user code; the decorator rejects invocations of it.
pub const MAIN_MODULE: &str = "principal";
