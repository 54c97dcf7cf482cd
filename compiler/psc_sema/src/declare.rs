//! Declarator: one variable table per module.
//!
//! Parameters and local declarations share one namespace. Array cells are
//! sized here, once, from the constant dimension vectors; the evaluator
//! never reallocates storage.

use psc_diagnostic::ErrorCode;
use psc_ir::{ModuleDef, Name, SourceProgram, Span, StringInterner, VarTable, Variable};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::SemaError;

/// Report duplicate module names (the main block occupies `principal`).
pub(crate) fn check_module_names(
    program: &SourceProgram,
    interner: &StringInterner,
    errors: &mut Vec<SemaError>,
) {
    let mut seen = FxHashSet::default();
    for module in &program.modules {
        if !seen.insert(module.name) {
            errors.push(SemaError::new(
                ErrorCode::E2002,
                format!("el modulo `{}` ya fue definido", interner.lookup(module.name)),
                module.span,
            ));
        }
    }
}

/// Build every module's variable table.
pub(crate) fn build_tables(
    program: &SourceProgram,
    interner: &StringInterner,
    errors: &mut Vec<SemaError>,
) -> FxHashMap<Name, VarTable> {
    let mut tables = FxHashMap::default();
    for module in &program.modules {
        let table = build_table(module, interner, errors);
        debug!(
            module = interner.lookup(module.name),
            vars = table.len(),
            "declared module"
        );
        tables.insert(module.name, table);
    }
    tables
}

fn build_table(
    module: &ModuleDef,
    interner: &StringInterner,
    errors: &mut Vec<SemaError>,
) -> VarTable {
    let mut table = VarTable::new();
    let mut first_site: FxHashMap<Name, Span> = FxHashMap::default();

    for param in &module.params {
        if table.insert(param.name, Variable::scalar(param.ty)) {
            first_site.insert(param.name, param.span);
        } else {
            errors.push(duplicate(
                format!(
                    "el parametro `{}` ya fue declarado",
                    interner.lookup(param.name)
                ),
                param.span,
                first_site.get(&param.name).copied(),
            ));
        }
    }

    for decl in &module.decls {
        let var = if decl.dims.is_empty() {
            Variable::scalar(decl.ty)
        } else {
            Variable::array(decl.ty, decl.dims.clone())
        };
        if table.insert(decl.name, var) {
            first_site.insert(decl.name, decl.span);
        } else {
            errors.push(duplicate(
                format!(
                    "la variable `{}` ya fue declarada",
                    interner.lookup(decl.name)
                ),
                decl.span,
                first_site.get(&decl.name).copied(),
            ));
        }
    }

    table
}

fn duplicate(message: String, span: Span, first: Option<Span>) -> SemaError {
    let error = SemaError::new(ErrorCode::E2001, message, span);
    match first {
        Some(first) => error.with_label(first, "declarada por primera vez aqui"),
        None => error,
    }
}
