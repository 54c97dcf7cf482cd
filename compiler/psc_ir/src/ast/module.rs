//! Module definitions: the main program and user callables.

use crate::{Name, Span, Stmt, Type};

/// A variable declaration from a `variables` section.
#[derive(Clone, Debug, PartialEq)]
pub struct Decl {
    pub name: Name,
    pub ty: Type,
    /// Declared dimensions; empty for scalars. Fixed at declaration time.
    pub dims: Vec<u32>,
    pub span: Span,
}

/// A declared parameter of a function or procedure.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub ty: Type,
    /// `var` marker: pass by reference.
    pub by_ref: bool,
    pub span: Span,
}

/// What kind of module a definition is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleKind {
    /// The program entry point. Not callable, has no parameters.
    Main,
    /// `funcion … : tipo` — callable, produces a value.
    Function { ret: Type },
    /// `procedimiento` — callable, produces no value.
    Procedure,
}

/// A named unit of code: the main block or a user-defined callable.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleDef {
    pub name: Name,
    pub kind: ModuleKind,
    /// Ordered parameter list; empty for the main module.
    pub params: Vec<Param>,
    /// Declarations from the module's `variables` section.
    pub decls: Vec<Decl>,
    /// Executable statements between `inicio` and the closing keyword.
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl ModuleDef {
    #[inline]
    pub fn is_main(&self) -> bool {
        matches!(self.kind, ModuleKind::Main)
    }

    /// Declared return type, for functions.
    pub fn return_type(&self) -> Option<Type> {
        match self.kind {
            ModuleKind::Function { ret } => Some(ret),
            _ => None,
        }
    }
}

/// Parser output: every module of one source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceProgram {
    pub modules: Vec<ModuleDef>,
}

impl SourceProgram {
    /// The main module, if the source declared one.
    pub fn main(&self) -> Option<&ModuleDef> {
        self.modules.iter().find(|m| m.is_main())
    }
}
