//! The statement graph: a flat arena of primitive execution nodes.
//!
//! Lowering flattens every statement and expression into nodes with
//! branch-dependent successors; the evaluator executes exactly one node
//! per step. Nodes live in one arena shared by every module and are
//! addressed by [`NodeId`] handles.

#[cfg(test)]
mod tests;

use psc_ir::{BinaryOp, Name, Type, UnaryOp, Value};

/// Handle into the graph arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// How one call argument travels into the callee.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgSpec {
    /// Preceding nodes pushed the argument's value; copy it in.
    ByValue,
    /// Preceding nodes pushed `index_count` index values for a variable
    /// in the caller's scope; copy its cell in and write the parameter
    /// back when the call returns.
    ByRef {
        name: Name,
        index_count: u32,
        dims: Vec<u32>,
    },
}

/// Primitive node kinds.
///
/// Expression nodes (`Push` through `Binary`) operate purely on the value
/// stack; the rest touch variable storage or control flow.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Push a literal.
    Push(Value),
    /// Discard the top of the stack (unused call results).
    Pop,
    /// Push a scalar variable's value.
    Load(Name),
    /// Pop `index_count` indices, push the addressed array cell.
    LoadIndexed {
        name: Name,
        index_count: u32,
        dims: Vec<u32>,
    },
    /// Pop one operand, push the result.
    Unary(UnaryOp),
    /// Pop two operands, push the result.
    Binary(BinaryOp),
    /// Pop a value into a scalar variable.
    Assign(Name),
    /// Pop the value, then `index_count` indices in reverse push order,
    /// and store into the addressed cell.
    AssignIndexed {
        name: Name,
        index_count: u32,
        dims: Vec<u32>,
    },
    /// Pop argument data (reverse argument order), bind the callee's
    /// parameters, and transfer control to its root.
    CallModule { name: Name, args: Vec<ArgSpec> },
    /// Pop `index_count` indices addressing the target variable, then
    /// suspend until the host supplies a value of type `ty`.
    ReadCall {
        name: Name,
        index_count: u32,
        dims: Vec<u32>,
        ty: Type,
    },
    /// Pop a value and report it to the host.
    WriteCall,
    /// Pop the condition; enter `true_root` or `false_root`. A `None`
    /// root falls through to the convergence node in `next`.
    Branch {
        true_root: Option<NodeId>,
        false_root: Option<NodeId>,
    },
    /// Pop the condition (re-evaluated each iteration via the chain at
    /// `cond_head`); enter `body_root` while it holds, else leave through
    /// `next`. `negate` inverts the test for `hasta` loops. An empty body
    /// cycles straight back to `cond_head`.
    Loop {
        body_root: Option<NodeId>,
        cond_head: NodeId,
        negate: bool,
    },
    /// Leave the current module, copying by-reference parameters back.
    Return,
}

/// One node: what to do, and where control flows next.
///
/// `next` is `None` only at a true end of execution (program end, or a
/// `Return`); every other successor is wired during lowering, before the
/// evaluator ever runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub next: Option<NodeId>,
}

/// Arena of nodes shared by every lowered module.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    /// Allocate a node with no successor yet.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("graph exceeded {} nodes", u32::MAX));
        self.nodes.push(Node { kind, next: None });
        NodeId(id)
    }

    /// Wire a node's successor.
    pub fn set_next(&mut self, id: NodeId, next: NodeId) {
        self.nodes[id.index()].next = Some(next);
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
