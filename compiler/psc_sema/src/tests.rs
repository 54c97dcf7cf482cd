//! Declarator and decorator tests.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use psc_diagnostic::ErrorCode;
use psc_ir::{StringInterner, Type};

use crate::{check, CheckedProgram, SemaError};

fn analyze(source: &str) -> (CheckedProgram, Vec<SemaError>, StringInterner) {
    let interner = StringInterner::new();
    let (tokens, lex_errors) = psc_lexer::tokenize(source, &interner);
    assert_eq!(lex_errors, vec![]);
    let (program, parse_errors) = psc_parse::parse(&tokens, &interner);
    assert_eq!(parse_errors, vec![]);
    let (checked, errors) = check(program, &interner);
    (checked, errors, interner)
}

fn codes(source: &str) -> Vec<ErrorCode> {
    let (_, errors, _) = analyze(source);
    errors.into_iter().map(|e| e.code).collect()
}

#[test]
fn builds_tables_for_every_module() {
    let source = "funcion doble(entero n): entero\n\
                  inicio\n\
                  retornar n * 2\n\
                  finfuncion\n\
                  variables\n\
                  entero a, v[5]\n\
                  inicio\n\
                  a <- doble(3)\n\
                  fin\n";
    let (checked, errors, interner) = analyze(source);
    assert_eq!(errors, vec![]);

    let main_table = checked.table(interner.intern("principal")).unwrap();
    assert_eq!(main_table.len(), 2);
    let v = main_table.get(interner.intern("v")).unwrap();
    assert_eq!(v.dims(), &[5]);
    assert_eq!(v.cell_count(), 5);

    let doble_table = checked.table(interner.intern("doble")).unwrap();
    let n = doble_table.get(interner.intern("n")).unwrap();
    assert_eq!(n.ty(), Type::Entero);
    assert!(!n.is_array());
}

#[test]
fn duplicate_declaration_is_rejected() {
    let source = "variables\nentero a\nreal a\ninicio\nfin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2001]);
}

#[test]
fn duplicate_declaration_labels_the_first_site() {
    let source = "variables\nentero a\nreal a\ninicio\nfin\n";
    let (_, errors, _) = analyze(source);
    assert_eq!(errors.len(), 1);
    let (first, _) = errors[0].label.clone().unwrap();
    // The label points at the `entero a` declarator, not the duplicate.
    assert!(first.start < errors[0].span.start);
}

#[test]
fn by_ref_shape_error_carries_a_hint() {
    let source = "procedimiento inc(var entero n)\n\
                  inicio\n\
                  n <- n + 1\n\
                  finprocedimiento\n\
                  inicio\n\
                  inc(1 + 2)\n\
                  fin\n";
    let (_, errors, _) = analyze(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E2009);
    assert!(errors[0].note.is_some());
    assert!(errors[0].label.is_some());
}

#[test]
fn parameter_and_local_share_a_namespace() {
    let source = "procedimiento p(entero x)\n\
                  variables\n\
                  entero x\n\
                  inicio\n\
                  finprocedimiento\n\
                  inicio\n\
                  p(1)\n\
                  fin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2001]);
}

#[test]
fn duplicate_module_is_rejected() {
    let source = "procedimiento p()\ninicio\nfinprocedimiento\n\
                  procedimiento p()\ninicio\nfinprocedimiento\n\
                  inicio\nfin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2002]);
}

#[test]
fn undefined_variable_is_rejected() {
    assert_eq!(codes("inicio\na <- b\nfin\n"),
               vec![ErrorCode::E2003, ErrorCode::E2003]);
}

#[test]
fn undefined_module_is_rejected() {
    assert_eq!(codes("inicio\nf()\nfin\n"), vec![ErrorCode::E2004]);
}

#[test]
fn calling_main_is_rejected() {
    assert_eq!(codes("inicio\nprincipal()\nfin\n"), vec![ErrorCode::E2011]);
}

#[test]
fn arity_mismatch_is_rejected() {
    let source = "funcion doble(entero n): entero\n\
                  inicio\n\
                  retornar n * 2\n\
                  finfuncion\n\
                  variables\n\
                  entero a\n\
                  inicio\n\
                  a <- doble(1, 2)\n\
                  fin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2005]);
}

#[test]
fn index_shape_violations() {
    let source = "variables\n\
                  entero a, v[5], m[2, 3]\n\
                  inicio\n\
                  a <- a[1]\n\
                  a <- v\n\
                  a <- m[1]\n\
                  fin\n";
    assert_eq!(
        codes(source),
        vec![ErrorCode::E2007, ErrorCode::E2008, ErrorCode::E2006],
    );
}

#[test]
fn by_ref_argument_must_be_a_variable() {
    let source = "procedimiento inc(var entero n)\n\
                  inicio\n\
                  n <- n + 1\n\
                  finprocedimiento\n\
                  variables\n\
                  entero a\n\
                  inicio\n\
                  inc(a)\n\
                  inc(a + 1)\n\
                  fin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2009]);
}

#[test]
fn return_shape_follows_module_kind() {
    let source = "funcion f(): entero\n\
                  inicio\n\
                  retornar\n\
                  finfuncion\n\
                  procedimiento p()\n\
                  inicio\n\
                  retornar 1\n\
                  finprocedimiento\n\
                  inicio\n\
                  p()\n\
                  fin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2010, ErrorCode::E2010]);
}

#[test]
fn read_targets_must_be_variables() {
    let source = "variables\n\
                  entero a\n\
                  inicio\n\
                  leer(a)\n\
                  leer(a + 1)\n\
                  leer()\n\
                  fin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2012, ErrorCode::E2013]);
}

#[test]
fn builtins_are_not_expressions() {
    let source = "variables\nentero a\ninicio\na <- leer(a)\nfin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2014]);
}

#[test]
fn procedure_call_in_expression_is_rejected() {
    let source = "procedimiento p()\n\
                  inicio\n\
                  finprocedimiento\n\
                  variables\n\
                  entero a\n\
                  inicio\n\
                  a <- p()\n\
                  fin\n";
    assert_eq!(codes(source), vec![ErrorCode::E2014]);
}

#[test]
fn globals_are_visible_inside_callables() {
    let source = "procedimiento toca()\n\
                  inicio\n\
                  total <- total + 1\n\
                  finprocedimiento\n\
                  variables\n\
                  entero total\n\
                  inicio\n\
                  toca()\n\
                  fin\n";
    assert_eq!(codes(source), vec![]);
}

#[test]
fn indexed_read_target_is_accepted() {
    let source = "variables\n\
                  entero v[5], i\n\
                  inicio\n\
                  leer(v[i])\n\
                  escribir(v[i])\n\
                  fin\n";
    assert_eq!(codes(source), vec![]);
}
