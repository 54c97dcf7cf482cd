//! Semantic analysis for PsC: the declarator and the decorator.
//!
//! The declarator turns each module's `variables` section into a
//! [`VarTable`] of typed, sized storage. The decorator then walks every
//! statement and expression, cross-referencing invocations against the
//! tables and the module map, so that the evaluator can assume names
//! resolve and shapes match.

mod declare;
mod decorate;
mod error;

#[cfg(test)]
mod tests;

pub use error::SemaError;

use psc_ir::{ModuleDef, Name, SourceProgram, StringInterner, VarTable};
use rustc_hash::FxHashMap;

/// Analysis output: every module and its storage, keyed by name.
///
/// The evaluator owns this for the whole run; tables are mutated in place
/// as the program executes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckedProgram {
    pub modules: FxHashMap<Name, ModuleDef>,
    pub tables: FxHashMap<Name, VarTable>,
}

impl CheckedProgram {
    pub fn module(&self, name: Name) -> Option<&ModuleDef> {
        self.modules.get(&name)
    }

    pub fn table(&self, name: Name) -> Option<&VarTable> {
        self.tables.get(&name)
    }
}

/// Run the declarator and decorator over a parsed program.
///
/// Always produces a `CheckedProgram`; when the error vector is non-empty
/// the program must not be evaluated.
pub fn check(
    program: SourceProgram,
    interner: &StringInterner,
) -> (CheckedProgram, Vec<SemaError>) {
    let mut errors = Vec::new();

    declare::check_module_names(&program, interner, &mut errors);
    let tables = declare::build_tables(&program, interner, &mut errors);
    errors.extend(decorate::Decorator::new(&program, &tables, interner).run(&program));

    let modules = program.modules.into_iter().map(|m| (m.name, m)).collect();
    (CheckedProgram { modules, tables }, errors)
}
