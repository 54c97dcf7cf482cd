//! Parse tree: postfix expressions, statements, and module definitions.

mod expr;
mod module;
mod stmt;

pub use expr::{BinaryOp, ExprElem, RpnExpr, UnaryOp};
pub use module::{Decl, ModuleDef, ModuleKind, Param, SourceProgram};
pub use stmt::{Stmt, StmtKind};
