//! Graph arena tests.

use pretty_assertions::assert_eq;
use psc_ir::Value;

use super::{Graph, NodeKind};

#[test]
fn alloc_leaves_next_dangling() {
    let mut graph = Graph::new();
    let a = graph.alloc(NodeKind::Push(Value::Int(1)));
    assert_eq!(graph.node(a).next, None);
    assert_eq!(graph.len(), 1);
}

#[test]
fn set_next_wires_successors() {
    let mut graph = Graph::new();
    let a = graph.alloc(NodeKind::Push(Value::Int(1)));
    let b = graph.alloc(NodeKind::Pop);
    graph.set_next(a, b);
    assert_eq!(graph.node(a).next, Some(b));
    assert_eq!(graph.node(b).next, None);
}

#[test]
fn ids_are_stable_across_allocations() {
    let mut graph = Graph::new();
    let first = graph.alloc(NodeKind::Pop);
    for _ in 0..100 {
        graph.alloc(NodeKind::Pop);
    }
    assert_eq!(graph.node(first).kind, NodeKind::Pop);
    assert_eq!(first.index(), 0);
    assert_eq!(graph.len(), 101);
}
