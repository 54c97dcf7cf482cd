//! Graph builder tests: full frontend, then inspect the nodes.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use psc_ir::{BinaryOp, StringInterner, Type, Value, MAIN_MODULE};

use crate::graph::{ArgSpec, NodeId, NodeKind};
use crate::program::Program;

fn lowered(source: &str) -> (Program, StringInterner) {
    let interner = StringInterner::new();
    let (tokens, lex_errors) = psc_lexer::tokenize(source, &interner);
    assert_eq!(lex_errors, vec![]);
    let (parsed, parse_errors) = psc_parse::parse(&tokens, &interner);
    assert_eq!(parse_errors, vec![]);
    let (checked, sema_errors) = psc_sema::check(parsed, &interner);
    assert_eq!(sema_errors, vec![]);
    let program = super::lower(checked, &interner);
    (program, interner)
}

fn main_root(program: &Program, interner: &StringInterner) -> NodeId {
    program.roots[&interner.intern(MAIN_MODULE)].unwrap()
}

/// Follow `next` links from `root`. Only valid for loop-free chains.
fn kinds_from(program: &Program, root: NodeId) -> Vec<NodeKind> {
    let mut kinds = Vec::new();
    let mut current = Some(root);
    while let Some(id) = current {
        let node = program.graph.node(id);
        kinds.push(node.kind.clone());
        current = node.next;
    }
    kinds
}

#[test]
fn assignment_lowers_to_postfix_chain() {
    let (program, interner) = lowered("variables\nentero a\ninicio\na <- 2 + 3 * 4\nfin\n");
    let a = interner.intern("a");
    assert_eq!(
        kinds_from(&program, main_root(&program, &interner)),
        vec![
            NodeKind::Push(Value::Int(2)),
            NodeKind::Push(Value::Int(3)),
            NodeKind::Push(Value::Int(4)),
            NodeKind::Binary(BinaryOp::Mul),
            NodeKind::Binary(BinaryOp::Add),
            NodeKind::Assign(a),
        ],
    );
}

#[test]
fn builtins_lower_to_read_and_write_nodes() {
    let (program, interner) = lowered(
        "variables\nentero a, v[5]\ninicio\nleer(a, v[2])\nescribir(a + 1)\nfin\n",
    );
    let a = interner.intern("a");
    let v = interner.intern("v");
    assert_eq!(
        kinds_from(&program, main_root(&program, &interner)),
        vec![
            NodeKind::ReadCall {
                name: a,
                index_count: 0,
                dims: vec![],
                ty: Type::Entero,
            },
            NodeKind::Push(Value::Int(2)),
            NodeKind::ReadCall {
                name: v,
                index_count: 1,
                dims: vec![5],
                ty: Type::Entero,
            },
            NodeKind::Load(a),
            NodeKind::Push(Value::Int(1)),
            NodeKind::Binary(BinaryOp::Add),
            NodeKind::WriteCall,
        ],
    );
}

#[test]
fn branch_arms_reconverge_on_the_branch_successor() {
    let source = "variables\nentero a\ninicio\n\
                  si verdadero entonces\n\
                  a <- 1\n\
                  sino\n\
                  a <- 2\n\
                  finsi\n\
                  a <- 3\n\
                  fin\n";
    let (program, interner) = lowered(source);

    let root = main_root(&program, &interner);
    let push_true = program.graph.node(root);
    assert_eq!(push_true.kind, NodeKind::Push(Value::Bool(true)));

    let branch_id = push_true.next.unwrap();
    let branch = program.graph.node(branch_id);
    let NodeKind::Branch {
        true_root,
        false_root,
    } = &branch.kind
    else {
        panic!("expected a branch, got {:?}", branch.kind);
    };
    let convergence = branch.next.unwrap();

    for root in [true_root.unwrap(), false_root.unwrap()] {
        // Arm: Push, Assign, then next points at the convergence node.
        let push = program.graph.node(root);
        let assign = program.graph.node(push.next.unwrap());
        assert!(matches!(assign.kind, NodeKind::Assign(_)));
        assert_eq!(assign.next, Some(convergence));
    }

    let after = program.graph.node(convergence);
    assert_eq!(after.kind, NodeKind::Push(Value::Int(3)));
}

#[test]
fn empty_else_falls_through_the_branch_node() {
    let source = "variables\nentero a\ninicio\n\
                  si a < 1 entonces\n\
                  a <- 1\n\
                  finsi\n\
                  fin\n";
    let (program, interner) = lowered(source);

    let mut current = main_root(&program, &interner);
    while !matches!(program.graph.node(current).kind, NodeKind::Branch { .. }) {
        current = program.graph.node(current).next.unwrap();
    }
    let branch = program.graph.node(current);
    let NodeKind::Branch {
        true_root,
        false_root,
    } = &branch.kind
    else {
        unreachable!();
    };
    assert!(true_root.is_some());
    assert_eq!(*false_root, None);
    // Last statement of the program: the convergence is the true end.
    assert_eq!(branch.next, None);
}

#[test]
fn while_body_cycles_back_to_the_condition_head() {
    let source = "variables\nentero a\ninicio\n\
                  mientras a < 3 hacer\n\
                  a <- a + 1\n\
                  finmientras\n\
                  fin\n";
    let (program, interner) = lowered(source);

    let cond_head = main_root(&program, &interner);
    assert_eq!(
        program.graph.node(cond_head).kind,
        NodeKind::Load(interner.intern("a")),
    );

    // Condition chain: Load, Push, Lt, Loop.
    let mut id = cond_head;
    for _ in 0..3 {
        id = program.graph.node(id).next.unwrap();
    }
    let loop_node = program.graph.node(id);
    let NodeKind::Loop {
        body_root,
        cond_head: head,
        negate,
    } = &loop_node.kind
    else {
        panic!("expected a loop, got {:?}", loop_node.kind);
    };
    assert_eq!(*head, cond_head);
    assert!(!negate);
    assert_eq!(loop_node.next, None);

    // Body tail's next is the back-edge.
    let mut tail = body_root.unwrap();
    while let Some(next) = program.graph.node(tail).next {
        if next == cond_head {
            return;
        }
        tail = next;
    }
    panic!("body never cycles back to the condition head");
}

#[test]
fn until_negates_its_condition() {
    let source = "variables\nentero a\ninicio\n\
                  hasta a = 3 hacer\n\
                  a <- a + 1\n\
                  finhasta\n\
                  fin\n";
    let (program, interner) = lowered(source);

    let mut id = main_root(&program, &interner);
    loop {
        if let NodeKind::Loop { negate, .. } = &program.graph.node(id).kind {
            assert!(*negate);
            return;
        }
        id = program.graph.node(id).next.unwrap();
    }
}

#[test]
fn for_desugars_to_init_test_increment() {
    let source = "variables\nentero i, s\ninicio\n\
                  para i <- 1 hasta 5 hacer\n\
                  s <- s + i\n\
                  finpara\n\
                  fin\n";
    let (program, interner) = lowered(source);
    let i = interner.intern("i");

    // Init: Push(1), Assign(i), then into the condition chain.
    let root = main_root(&program, &interner);
    assert_eq!(program.graph.node(root).kind, NodeKind::Push(Value::Int(1)));
    let init = program.graph.node(root).next.unwrap();
    assert_eq!(program.graph.node(init).kind, NodeKind::Assign(i));

    // Condition: Load(i), Push(5), Le, Loop.
    let cond_head = program.graph.node(init).next.unwrap();
    assert_eq!(program.graph.node(cond_head).kind, NodeKind::Load(i));
    let mut id = cond_head;
    for _ in 0..3 {
        id = program.graph.node(id).next.unwrap();
    }
    let NodeKind::Loop {
        body_root,
        cond_head: head,
        negate,
    } = &program.graph.node(id).kind
    else {
        panic!("expected the desugared loop node");
    };
    assert_eq!(*head, cond_head);
    assert!(!negate);

    // Body ends with the appended increment: Load(i), Push(1), Add,
    // Assign(i), back-edge.
    let mut tail = body_root.unwrap();
    let mut seen = Vec::new();
    loop {
        let node = program.graph.node(tail);
        seen.push(node.kind.clone());
        match node.next {
            Some(next) if next == cond_head => break,
            Some(next) => tail = next,
            None => panic!("body chain dangles"),
        }
    }
    let increment = &seen[seen.len() - 4..];
    assert_eq!(
        increment,
        &[
            NodeKind::Load(i),
            NodeKind::Push(Value::Int(1)),
            NodeKind::Binary(BinaryOp::Add),
            NodeKind::Assign(i),
        ],
    );
}

#[test]
fn discarded_function_result_gets_a_pop() {
    let source = "funcion uno(): entero\n\
                  inicio\n\
                  retornar 1\n\
                  finfuncion\n\
                  inicio\n\
                  uno()\n\
                  fin\n";
    let (program, interner) = lowered(source);
    assert_eq!(
        kinds_from(&program, main_root(&program, &interner)),
        vec![
            NodeKind::CallModule {
                name: interner.intern("uno"),
                args: vec![],
            },
            NodeKind::Pop,
        ],
    );
}

#[test]
fn by_ref_arguments_lower_index_chains_only() {
    let source = "procedimiento pon(var entero celda)\n\
                  inicio\n\
                  celda <- 9\n\
                  finprocedimiento\n\
                  variables\n\
                  entero v[5]\n\
                  inicio\n\
                  pon(v[2])\n\
                  fin\n";
    let (program, interner) = lowered(source);
    assert_eq!(
        kinds_from(&program, main_root(&program, &interner)),
        vec![
            NodeKind::Push(Value::Int(2)),
            NodeKind::CallModule {
                name: interner.intern("pon"),
                args: vec![ArgSpec::ByRef {
                    name: interner.intern("v"),
                    index_count: 1,
                    dims: vec![5],
                }],
            },
        ],
    );
}
