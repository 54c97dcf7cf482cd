//! Parser tests.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use psc_diagnostic::ErrorCode;
use psc_ir::{
    BinaryOp, ExprElem, ModuleKind, RpnExpr, SourceProgram, StmtKind, StringInterner, Type,
    UnaryOp, Value,
};

use crate::{parse, ParseError};

fn parse_source(source: &str) -> (SourceProgram, Vec<ParseError>, StringInterner) {
    let interner = StringInterner::new();
    let (tokens, lex_errors) = psc_lexer::tokenize(source, &interner);
    assert_eq!(lex_errors, vec![]);
    let (program, errors) = parse(&tokens, &interner);
    (program, errors, interner)
}

fn parse_ok(source: &str) -> (SourceProgram, StringInterner) {
    let (program, errors, interner) = parse_source(source);
    assert_eq!(errors, vec![]);
    (program, interner)
}

/// Wrap a statement list in a minimal main block and return its body.
fn parse_body(stmts: &str) -> (Vec<psc_ir::Stmt>, StringInterner) {
    let source = format!("inicio\n{stmts}\nfin\n");
    let (program, interner) = parse_ok(&source);
    assert_eq!(program.modules.len(), 1);
    let main = program.modules.into_iter().next().unwrap();
    assert_eq!(main.kind, ModuleKind::Main);
    (main.body, interner)
}

fn lit(n: i64) -> ExprElem {
    ExprElem::Literal(Value::Int(n))
}

fn bin(op: BinaryOp) -> ExprElem {
    ExprElem::Binary(op)
}

/// A scalar load, span ignored via pattern matching in callers.
fn assert_load(elem: &ExprElem, interner: &StringInterner, expected: &str) {
    match elem {
        ExprElem::Load { name, indices, .. } => {
            assert_eq!(interner.lookup(*name), expected);
            assert_eq!(indices.len(), 0);
        }
        other => panic!("expected load of `{expected}`, got {other:?}"),
    }
}

fn assign_value(stmt: &psc_ir::Stmt) -> &RpnExpr {
    match &stmt.kind {
        StmtKind::Assign { value, .. } => value,
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn precedence_multiplication_before_addition() {
    let (body, _) = parse_body("a <- 2 + 3 * 4");
    assert_eq!(body.len(), 1);
    assert_eq!(
        assign_value(&body[0]),
        &vec![lit(2), lit(3), lit(4), bin(BinaryOp::Mul), bin(BinaryOp::Add)],
    );
}

#[test]
fn subtraction_is_left_associative() {
    let (body, _) = parse_body("a <- 3 - 2 - 3");
    assert_eq!(
        assign_value(&body[0]),
        &vec![lit(3), lit(2), bin(BinaryOp::Sub), lit(3), bin(BinaryOp::Sub)],
    );
}

#[test]
fn parentheses_override_precedence() {
    let (body, _) = parse_body("a <- (2 + 3) * 4");
    assert_eq!(
        assign_value(&body[0]),
        &vec![lit(2), lit(3), bin(BinaryOp::Add), lit(4), bin(BinaryOp::Mul)],
    );
}

#[test]
fn unary_operators_bind_tightest() {
    let (body, interner) = parse_body("a <- -b + 2");
    let value = assign_value(&body[0]);
    assert_eq!(value.len(), 4);
    assert_load(&value[0], &interner, "b");
    assert_eq!(value[1], ExprElem::Unary(UnaryOp::Neg));
    assert_eq!(value[2], lit(2));
    assert_eq!(value[3], bin(BinaryOp::Add));
}

#[test]
fn logical_operators_bind_loosest() {
    // no p y q = r  parses as  (no p) y (q = r)
    let (body, interner) = parse_body("a <- no p y q = r");
    let value = assign_value(&body[0]);
    assert_load(&value[0], &interner, "p");
    assert_eq!(value[1], ExprElem::Unary(UnaryOp::Not));
    assert_load(&value[2], &interner, "q");
    assert_load(&value[3], &interner, "r");
    assert_eq!(value[4], bin(BinaryOp::Eq));
    assert_eq!(value[5], bin(BinaryOp::And));
}

#[test]
fn call_in_expression_carries_argument_exprs() {
    let (body, interner) = parse_body("a <- doble(n + 1)");
    let value = assign_value(&body[0]);
    match &value[0] {
        ExprElem::Call { name, args, .. } => {
            assert_eq!(interner.lookup(*name), "doble");
            assert_eq!(args.len(), 1);
            assert_load(&args[0][0], &interner, "n");
            assert_eq!(args[0][1], lit(1));
            assert_eq!(args[0][2], bin(BinaryOp::Add));
        }
        other => panic!("expected call, got {other:?}"),
    }
}

#[test]
fn indexed_assignment_collects_index_exprs() {
    let (body, interner) = parse_body("v[i, j + 1] <- 0");
    match &body[0].kind {
        StmtKind::Assign {
            name,
            indices,
            value,
        } => {
            assert_eq!(interner.lookup(*name), "v");
            assert_eq!(indices.len(), 2);
            assert_load(&indices[0][0], &interner, "i");
            assert_eq!(indices[1].len(), 3);
            assert_eq!(value, &vec![lit(0)]);
        }
        other => panic!("expected indexed assignment, got {other:?}"),
    }
}

#[test]
fn if_with_else_branches() {
    let (body, _) = parse_body("si a < 10 entonces\nb <- 1\nsino\nb <- 2\nfinsi");
    match &body[0].kind {
        StmtKind::If {
            cond,
            then_body,
            else_body,
        } => {
            assert_eq!(cond.last(), Some(&bin(BinaryOp::Lt)));
            assert_eq!(then_body.len(), 1);
            assert_eq!(else_body.len(), 1);
        }
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn while_and_until_loops() {
    let (body, _) = parse_body("mientras a < 3 hacer\na <- a + 1\nfinmientras");
    assert!(matches!(&body[0].kind, StmtKind::While { body, .. } if body.len() == 1));

    let (body, _) = parse_body("hasta a = 3 hacer\na <- a + 1\nfinhasta");
    assert!(matches!(&body[0].kind, StmtKind::Until { body, .. } if body.len() == 1));
}

#[test]
fn for_loop_bounds_stop_at_keywords() {
    let (body, interner) = parse_body("para i <- 1 hasta n + 1 hacer\ns <- s + i\nfinpara");
    match &body[0].kind {
        StmtKind::For {
            counter,
            from,
            to,
            body,
        } => {
            assert_eq!(interner.lookup(*counter), "i");
            assert_eq!(from, &vec![lit(1)]);
            assert_eq!(to.len(), 3);
            assert_eq!(body.len(), 1);
        }
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn function_header_params_and_return_type() {
    let source = "funcion suma(entero a, var real b): entero\n\
                  inicio\n\
                  retornar a\n\
                  finfuncion\n\
                  inicio\n\
                  fin\n";
    let (program, interner) = parse_ok(source);
    assert_eq!(program.modules.len(), 2);

    let f = &program.modules[0];
    assert_eq!(interner.lookup(f.name), "suma");
    assert_eq!(f.kind, ModuleKind::Function { ret: Type::Entero });
    assert_eq!(f.params.len(), 2);
    assert!(!f.params[0].by_ref);
    assert_eq!(f.params[0].ty, Type::Entero);
    assert!(f.params[1].by_ref);
    assert_eq!(f.params[1].ty, Type::Real);
    assert!(matches!(&f.body[0].kind, StmtKind::Return { value: Some(_) }));
}

#[test]
fn procedure_with_bare_return() {
    let source = "procedimiento nada()\n\
                  inicio\n\
                  retornar\n\
                  finprocedimiento\n\
                  inicio\n\
                  nada()\n\
                  fin\n";
    let (program, interner) = parse_ok(source);
    let p = &program.modules[0];
    assert_eq!(p.kind, ModuleKind::Procedure);
    assert!(matches!(&p.body[0].kind, StmtKind::Return { value: None }));

    let main = program.main().unwrap();
    match &main.body[0].kind {
        StmtKind::Call { name, args } => {
            assert_eq!(interner.lookup(*name), "nada");
            assert_eq!(args.len(), 0);
        }
        other => panic!("expected call statement, got {other:?}"),
    }
}

#[test]
fn variables_section_with_arrays() {
    let source = "variables\n\
                  entero a, v[5]\n\
                  real m[2, 3]\n\
                  inicio\n\
                  fin\n";
    let (program, interner) = parse_ok(source);
    let main = program.main().unwrap();
    assert_eq!(main.decls.len(), 3);
    assert_eq!(interner.lookup(main.decls[0].name), "a");
    assert_eq!(main.decls[0].dims, Vec::<u32>::new());
    assert_eq!(main.decls[1].dims, vec![5]);
    assert_eq!(main.decls[2].ty, Type::Real);
    assert_eq!(main.decls[2].dims, vec![2, 3]);
}

#[test]
fn missing_main_is_reported() {
    let source = "funcion f(): entero\ninicio\nretornar 1\nfinfuncion\n";
    let (program, errors, _) = parse_source(source);
    assert_eq!(program.modules.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E1005);
}

#[test]
fn zero_dimension_is_rejected() {
    let source = "variables\nentero v[0]\ninicio\nfin\n";
    let (_, errors, _) = parse_source(source);
    assert!(errors.iter().any(|e| e.code == ErrorCode::E1006));
}

#[test]
fn unclosed_paren_is_reported() {
    let source = "inicio\na <- (2 + 3\nfin\n";
    let (_, errors, _) = parse_source(source);
    assert!(errors.iter().any(|e| e.code == ErrorCode::E1004));
}

#[test]
fn recovers_after_bad_statement() {
    let source = "inicio\na <- <- 2\nb <- 1\nfin\n";
    let (program, errors, _) = parse_source(source);
    assert!(!errors.is_empty());
    let main = program.main().unwrap();
    assert_eq!(main.body.len(), 1);
    assert!(matches!(&main.body[0].kind, StmtKind::Assign { .. }));
}
