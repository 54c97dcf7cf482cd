//! Decorator: cross-reference every invocation against the declared
//! tables.
//!
//! Runs after the declarator, so every check here can assume the tables
//! are complete. Everything the evaluator takes for granted — names
//! resolve, arities match, index counts match declared ranks — is
//! enforced here; the runtime panics if a violation slips through, so
//! this pass is the last line of defense.

use psc_diagnostic::ErrorCode;
use psc_ir::{
    ExprElem, ModuleDef, ModuleKind, Name, RpnExpr, SourceProgram, Span, Stmt, StmtKind,
    StringInterner, VarTable, MAIN_MODULE,
};
use rustc_hash::FxHashMap;

use crate::SemaError;

pub(crate) struct Decorator<'a> {
    modules: FxHashMap<Name, &'a ModuleDef>,
    tables: &'a FxHashMap<Name, VarTable>,
    interner: &'a StringInterner,
    main_name: Name,
    read_name: Name,
    write_name: Name,
    errors: Vec<SemaError>,
}

/// Scope of the module currently being checked.
struct Scope<'a> {
    locals: &'a VarTable,
    globals: Option<&'a VarTable>,
    kind: ModuleKind,
}

impl<'a> Scope<'a> {
    /// Two-level lookup: the module's own table, then the main table.
    fn resolve(&self, name: Name) -> Option<&'a psc_ir::Variable> {
        self.locals
            .get(name)
            .or_else(|| self.globals.and_then(|g| g.get(name)))
    }
}

impl<'a> Decorator<'a> {
    pub(crate) fn new(
        program: &'a SourceProgram,
        tables: &'a FxHashMap<Name, VarTable>,
        interner: &'a StringInterner,
    ) -> Self {
        let modules = program.modules.iter().map(|m| (m.name, m)).collect();
        Decorator {
            modules,
            tables,
            interner,
            main_name: interner.intern(MAIN_MODULE),
            read_name: interner.intern("leer"),
            write_name: interner.intern("escribir"),
            errors: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, program: &'a SourceProgram) -> Vec<SemaError> {
        for module in &program.modules {
            self.check_module(module);
        }
        self.errors
    }

    fn check_module(&mut self, module: &ModuleDef) {
        let globals = if module.is_main() {
            None
        } else {
            self.tables.get(&self.main_name)
        };
        let scope = Scope {
            locals: &self.tables[&module.name],
            globals,
            kind: module.kind,
        };
        for stmt in &module.body {
            self.check_stmt(stmt, &scope);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt, scope: &Scope<'_>) {
        match &stmt.kind {
            StmtKind::Assign {
                name,
                indices,
                value,
            } => {
                self.check_target(*name, indices, stmt.span, scope);
                for index in indices {
                    self.check_expr(index, scope);
                }
                self.check_expr(value, scope);
            }
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                self.check_expr(cond, scope);
                for s in then_body.iter().chain(else_body) {
                    self.check_stmt(s, scope);
                }
            }
            StmtKind::While { cond, body } | StmtKind::Until { cond, body } => {
                self.check_expr(cond, scope);
                for s in body {
                    self.check_stmt(s, scope);
                }
            }
            StmtKind::For {
                counter,
                from,
                to,
                body,
            } => {
                self.check_target(*counter, &[], stmt.span, scope);
                self.check_expr(from, scope);
                self.check_expr(to, scope);
                for s in body {
                    self.check_stmt(s, scope);
                }
            }
            StmtKind::Call { name, args } => {
                self.check_call_stmt(*name, args, stmt.span, scope);
            }
            StmtKind::Return { value } => {
                self.check_return(value.as_ref(), stmt.span, scope);
                if let Some(value) = value {
                    self.check_expr(value, scope);
                }
            }
        }
    }

    /// Validate an assignment or `leer` target (or the `para` counter,
    /// with an empty index list).
    fn check_target(&mut self, name: Name, indices: &[RpnExpr], span: Span, scope: &Scope<'_>) {
        let Some(var) = scope.resolve(name) else {
            self.undefined_variable(name, span);
            return;
        };
        self.check_rank(name, var.dims().len(), indices.len(), span);
    }

    fn check_expr(&mut self, expr: &RpnExpr, scope: &Scope<'_>) {
        for elem in expr {
            match elem {
                ExprElem::Load {
                    name,
                    indices,
                    span,
                } => {
                    match scope.resolve(*name) {
                        Some(var) => {
                            self.check_rank(*name, var.dims().len(), indices.len(), *span);
                        }
                        None => self.undefined_variable(*name, *span),
                    }
                    for index in indices {
                        self.check_expr(index, scope);
                    }
                }
                ExprElem::Call { name, args, span } => {
                    self.check_call_expr(*name, args, *span, scope);
                }
                ExprElem::Literal(_) | ExprElem::Unary(_) | ExprElem::Binary(_) => {}
            }
        }
    }

    /// Scalar/array shape check for one invocation.
    fn check_rank(&mut self, name: Name, declared: usize, given: usize, span: Span) {
        if declared == given {
            return;
        }
        let display = self.interner.lookup(name);
        let error = if declared == 0 {
            SemaError::new(
                ErrorCode::E2007,
                format!("`{display}` es escalar y no admite indices"),
                span,
            )
        } else if given == 0 {
            SemaError::new(
                ErrorCode::E2008,
                format!("el arreglo `{display}` requiere {declared} indice(s)"),
                span,
            )
        } else {
            SemaError::new(
                ErrorCode::E2006,
                format!("`{display}` tiene {declared} dimension(es), se indexo con {given}"),
                span,
            )
        };
        self.errors.push(error);
    }

    /// Call in statement position: a built-in, a procedure, or a function
    /// whose result is discarded.
    fn check_call_stmt(&mut self, name: Name, args: &[RpnExpr], span: Span, scope: &Scope<'_>) {
        if name == self.read_name {
            self.check_read_call(args, span, scope);
            return;
        }
        if name == self.write_name {
            self.check_write_call(args, span, scope);
            return;
        }
        self.check_user_call(name, args, span, scope);
    }

    /// Call in expression position: must produce a value.
    fn check_call_expr(&mut self, name: Name, args: &[RpnExpr], span: Span, scope: &Scope<'_>) {
        if name == self.read_name || name == self.write_name {
            self.errors.push(SemaError::new(
                ErrorCode::E2014,
                format!(
                    "`{}` no produce valor y no puede usarse en una expresion",
                    self.interner.lookup(name)
                ),
                span,
            ));
            for arg in args {
                self.check_expr(arg, scope);
            }
            return;
        }
        if let Some(module) = self.check_user_call(name, args, span, scope) {
            if matches!(module.kind, ModuleKind::Procedure) {
                self.errors.push(SemaError::new(
                    ErrorCode::E2014,
                    format!(
                        "el procedimiento `{}` no produce valor y no puede usarse en una expresion",
                        self.interner.lookup(name)
                    ),
                    span,
                ));
            }
        }
    }

    /// Shared validation for user-module calls; returns the callee when it
    /// resolves so expression-position callers can check its kind.
    fn check_user_call(
        &mut self,
        name: Name,
        args: &[RpnExpr],
        span: Span,
        scope: &Scope<'_>,
    ) -> Option<&'a ModuleDef> {
        for arg in args {
            self.check_expr(arg, scope);
        }

        if name == self.main_name {
            self.errors.push(SemaError::new(
                ErrorCode::E2011,
                "el programa principal no puede ser invocado",
                span,
            ));
            return None;
        }
        let Some(&module) = self.modules.get(&name) else {
            self.errors.push(SemaError::new(
                ErrorCode::E2004,
                format!("el modulo `{}` no esta definido", self.interner.lookup(name)),
                span,
            ));
            return None;
        };

        if module.params.len() != args.len() {
            self.errors.push(SemaError::new(
                ErrorCode::E2005,
                format!(
                    "`{}` espera {} argumento(s), se paso {}",
                    self.interner.lookup(name),
                    module.params.len(),
                    args.len()
                ),
                span,
            ));
            return Some(module);
        }

        // `var` parameters need a writable destination behind the argument.
        for (param, arg) in module.params.iter().zip(args) {
            if param.by_ref && variable_reference(arg).is_none() {
                self.errors.push(
                    SemaError::new(
                        ErrorCode::E2009,
                        format!(
                            "el parametro `{}` es por referencia y requiere una variable",
                            self.interner.lookup(param.name)
                        ),
                        span,
                    )
                    .with_label(param.span, "declarado `var` aqui")
                    .with_note("un argumento por referencia debe ser una variable, opcionalmente indexada"),
                );
            }
        }
        Some(module)
    }

    fn check_read_call(&mut self, args: &[RpnExpr], span: Span, scope: &Scope<'_>) {
        if args.is_empty() {
            self.errors.push(SemaError::new(
                ErrorCode::E2013,
                "`leer` requiere al menos un argumento",
                span,
            ));
            return;
        }
        for arg in args {
            match variable_reference(arg) {
                Some((name, indices, target_span)) => {
                    self.check_target(name, indices, target_span, scope);
                    for index in indices {
                        self.check_expr(index, scope);
                    }
                }
                None => {
                    self.errors.push(SemaError::new(
                        ErrorCode::E2012,
                        "los argumentos de `leer` deben ser variables",
                        span,
                    ));
                }
            }
        }
    }

    fn check_write_call(&mut self, args: &[RpnExpr], span: Span, scope: &Scope<'_>) {
        if args.is_empty() {
            self.errors.push(SemaError::new(
                ErrorCode::E2013,
                "`escribir` requiere al menos un argumento",
                span,
            ));
            return;
        }
        for arg in args {
            self.check_expr(arg, scope);
        }
    }

    /// `retornar` shape depends on the enclosing module kind: functions
    /// return a value, procedures and the main block return bare.
    fn check_return(&mut self, value: Option<&RpnExpr>, span: Span, scope: &Scope<'_>) {
        let error = match (scope.kind, value) {
            (ModuleKind::Function { .. }, None) => {
                Some("una funcion debe retornar un valor")
            }
            (ModuleKind::Procedure, Some(_)) => {
                Some("un procedimiento no puede retornar un valor")
            }
            (ModuleKind::Main, Some(_)) => {
                Some("el programa principal no puede retornar un valor")
            }
            _ => None,
        };
        if let Some(message) = error {
            self.errors
                .push(SemaError::new(ErrorCode::E2010, message, span));
        }
    }

    fn undefined_variable(&mut self, name: Name, span: Span) {
        self.errors.push(SemaError::new(
            ErrorCode::E2003,
            format!(
                "la variable `{}` no esta declarada",
                self.interner.lookup(name)
            ),
            span,
        ));
    }
}

/// An argument that is a plain (optionally indexed) variable reference:
/// exactly one `Load` element. Returns its name, index expressions, and
/// span.
fn variable_reference(arg: &RpnExpr) -> Option<(Name, &[RpnExpr], Span)> {
    match arg.as_slice() {
        [ExprElem::Load {
            name,
            indices,
            span,
        }] => Some((*name, indices, *span)),
        _ => None,
    }
}
