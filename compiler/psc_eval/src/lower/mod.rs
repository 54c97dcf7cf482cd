//! Graph builder: lowers checked statement trees into the node graph.
//!
//! Every statement and expression flattens into a chain of primitive
//! nodes. Control flow is the only place the chain forks: `si` lowers to
//! a `Branch` whose arms reconverge on the branch node's `next`, and the
//! loops lower to a condition chain cycling through a `Loop` node. Every
//! successor is wired here; the evaluator never sees a dangling `next`
//! except at a true end of execution.

#[cfg(test)]
mod tests;

use psc_ir::{
    BinaryOp, ExprElem, ModuleDef, ModuleKind, Name, RpnExpr, Stmt, StmtKind, StringInterner,
    Value, VarTable, Variable, MAIN_MODULE,
};
use psc_sema::CheckedProgram;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::graph::{ArgSpec, Graph, NodeId, NodeKind};
use crate::program::Program;

/// Lower every module of a checked program.
pub fn lower(checked: CheckedProgram, interner: &StringInterner) -> Program {
    let CheckedProgram { modules, tables } = checked;
    let mut graph = Graph::new();
    let mut roots = FxHashMap::default();

    {
        let main_name = interner.intern(MAIN_MODULE);
        let mut lowerer = Lowerer {
            graph: &mut graph,
            modules: &modules,
            tables: &tables,
            module: main_name,
            main_name,
            read_name: interner.intern("leer"),
            write_name: interner.intern("escribir"),
        };
        for (&name, def) in &modules {
            lowerer.module = name;
            let root = lowerer.lower_module(def);
            debug!(
                module = interner.lookup(name),
                nodes = lowerer.graph.len(),
                "lowered module"
            );
            roots.insert(name, root);
        }
    }

    Program {
        modules,
        tables,
        graph,
        roots,
    }
}

/// A partial chain under construction: its first node, and the nodes
/// whose `next` must be patched to whatever comes after.
///
/// A branch leaves several dangling tails (the branch node itself plus
/// each arm's tail); appending the next node converges them all.
struct Chain {
    root: Option<NodeId>,
    tails: SmallVec<[NodeId; 4]>,
}

impl Chain {
    fn new() -> Self {
        Chain {
            root: None,
            tails: SmallVec::new(),
        }
    }

    /// Allocate a node, wire every dangling tail to it, and make it the
    /// sole tail.
    fn push(&mut self, graph: &mut Graph, kind: NodeKind) -> NodeId {
        let id = graph.alloc(kind);
        self.link_to(graph, id);
        if self.root.is_none() {
            self.root = Some(id);
        }
        self.tails.clear();
        self.tails.push(id);
        id
    }

    /// Wire every dangling tail to an existing node (loop back-edges).
    fn link_to(&mut self, graph: &mut Graph, target: NodeId) {
        for &tail in &self.tails {
            graph.set_next(tail, target);
        }
    }
}

struct Lowerer<'a> {
    graph: &'a mut Graph,
    modules: &'a FxHashMap<Name, ModuleDef>,
    tables: &'a FxHashMap<Name, VarTable>,
    /// Module currently being lowered; scopes variable lookups.
    module: Name,
    main_name: Name,
    read_name: Name,
    write_name: Name,
}

impl Lowerer<'_> {
    fn lower_module(&mut self, def: &ModuleDef) -> Option<NodeId> {
        let chain = self.lower_stmts(&def.body);
        // The dangling tails are the module's true end.
        chain.root
    }

    fn lower_stmts(&mut self, stmts: &[Stmt]) -> Chain {
        let mut chain = Chain::new();
        for stmt in stmts {
            self.lower_stmt(&mut chain, stmt);
        }
        chain
    }

    fn lower_stmt(&mut self, chain: &mut Chain, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Assign {
                name,
                indices,
                value,
            } => self.lower_assign(chain, *name, indices, value),
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => self.lower_if(chain, cond, then_body, else_body),
            StmtKind::While { cond, body } => self.lower_loop(chain, cond, body, false),
            StmtKind::Until { cond, body } => self.lower_loop(chain, cond, body, true),
            StmtKind::For {
                counter,
                from,
                to,
                body,
            } => self.lower_for(chain, *counter, from, to, body),
            StmtKind::Call { name, args } => self.lower_call_stmt(chain, *name, args),
            StmtKind::Return { value } => {
                if let Some(value) = value {
                    self.lower_expr(chain, value);
                }
                chain.push(self.graph, NodeKind::Return);
                // Anything after `retornar` in the same body is dead.
                chain.tails.clear();
            }
        }
    }

    /// Indices left to right, value last, then the store node.
    fn lower_assign(&mut self, chain: &mut Chain, name: Name, indices: &[RpnExpr], value: &RpnExpr) {
        for index in indices {
            self.lower_expr(chain, index);
        }
        self.lower_expr(chain, value);
        if indices.is_empty() {
            chain.push(self.graph, NodeKind::Assign(name));
        } else {
            let dims = self.variable(name).dims().to_vec();
            chain.push(
                self.graph,
                NodeKind::AssignIndexed {
                    name,
                    index_count: count(indices),
                    dims,
                },
            );
        }
    }

    fn lower_if(&mut self, chain: &mut Chain, cond: &RpnExpr, then_body: &[Stmt], else_body: &[Stmt]) {
        self.lower_expr(chain, cond);
        let then_chain = self.lower_stmts(then_body);
        let else_chain = self.lower_stmts(else_body);
        chain.push(
            self.graph,
            NodeKind::Branch {
                true_root: then_chain.root,
                false_root: else_chain.root,
            },
        );
        // All three converge on whatever comes next: the branch node (the
        // fall-through of any empty arm) and each arm's own tails.
        chain.tails.extend(then_chain.tails);
        chain.tails.extend(else_chain.tails);
    }

    /// `mientras` and `hasta` share one shape; `negate` inverts the test.
    fn lower_loop(&mut self, chain: &mut Chain, cond: &RpnExpr, body: &[Stmt], negate: bool) {
        let mut cond_chain = Chain::new();
        self.lower_expr(&mut cond_chain, cond);
        let Some(cond_head) = cond_chain.root else {
            panic!("condition lowered to an empty chain");
        };

        let mut body_chain = self.lower_stmts(body);
        body_chain.link_to(self.graph, cond_head);

        let loop_node = cond_chain.push(
            self.graph,
            NodeKind::Loop {
                body_root: body_chain.root,
                cond_head,
                negate,
            },
        );

        chain.link_to(self.graph, cond_head);
        if chain.root.is_none() {
            chain.root = Some(cond_head);
        }
        chain.tails.clear();
        chain.tails.push(loop_node);
    }

    /// `para i <- e1 hasta e2` desugars to an init assignment, a
    /// `while i <= e2` test, and an increment appended to the body.
    fn lower_for(
        &mut self,
        chain: &mut Chain,
        counter: Name,
        from: &RpnExpr,
        to: &RpnExpr,
        body: &[Stmt],
    ) {
        self.lower_expr(chain, from);
        chain.push(self.graph, NodeKind::Assign(counter));

        let mut cond_chain = Chain::new();
        let cond_head = cond_chain.push(self.graph, NodeKind::Load(counter));
        self.lower_expr(&mut cond_chain, to);
        cond_chain.push(self.graph, NodeKind::Binary(BinaryOp::Le));

        let mut body_chain = self.lower_stmts(body);
        body_chain.push(self.graph, NodeKind::Load(counter));
        body_chain.push(self.graph, NodeKind::Push(Value::Int(1)));
        body_chain.push(self.graph, NodeKind::Binary(BinaryOp::Add));
        body_chain.push(self.graph, NodeKind::Assign(counter));
        body_chain.link_to(self.graph, cond_head);

        let loop_node = cond_chain.push(
            self.graph,
            NodeKind::Loop {
                body_root: body_chain.root,
                cond_head,
                negate: false,
            },
        );

        chain.link_to(self.graph, cond_head);
        chain.tails.clear();
        chain.tails.push(loop_node);
    }

    fn lower_call_stmt(&mut self, chain: &mut Chain, name: Name, args: &[RpnExpr]) {
        if name == self.read_name {
            self.lower_read(chain, args);
            return;
        }
        if name == self.write_name {
            for arg in args {
                self.lower_expr(chain, arg);
                chain.push(self.graph, NodeKind::WriteCall);
            }
            return;
        }

        self.lower_call(chain, name, args);
        // A function result in statement position is discarded.
        if matches!(
            self.modules.get(&name).map(|m| m.kind),
            Some(ModuleKind::Function { .. })
        ) {
            chain.push(self.graph, NodeKind::Pop);
        }
    }

    /// One `ReadCall` per target; multi-target `leer` repeats the cycle.
    fn lower_read(&mut self, chain: &mut Chain, args: &[RpnExpr]) {
        for arg in args {
            let (name, indices) = variable_reference(arg);
            for index in indices {
                self.lower_expr(chain, index);
            }
            let (dims, ty) = {
                let var = self.variable(name);
                (var.dims().to_vec(), var.ty())
            };
            chain.push(
                self.graph,
                NodeKind::ReadCall {
                    name,
                    index_count: count(indices),
                    dims,
                    ty,
                },
            );
        }
    }

    fn lower_expr(&mut self, chain: &mut Chain, expr: &RpnExpr) {
        for elem in expr {
            match elem {
                ExprElem::Literal(value) => {
                    chain.push(self.graph, NodeKind::Push(value.clone()));
                }
                ExprElem::Load { name, indices, .. } => {
                    if indices.is_empty() {
                        chain.push(self.graph, NodeKind::Load(*name));
                    } else {
                        for index in indices {
                            self.lower_expr(chain, index);
                        }
                        let dims = self.variable(*name).dims().to_vec();
                        chain.push(
                            self.graph,
                            NodeKind::LoadIndexed {
                                name: *name,
                                index_count: count(indices),
                                dims,
                            },
                        );
                    }
                }
                ExprElem::Call { name, args, .. } => self.lower_call(chain, *name, args),
                ExprElem::Unary(op) => {
                    chain.push(self.graph, NodeKind::Unary(*op));
                }
                ExprElem::Binary(op) => {
                    chain.push(self.graph, NodeKind::Binary(*op));
                }
            }
        }
    }

    /// Lower a user-module call: by-value arguments push their value,
    /// by-reference arguments push only their index chains.
    fn lower_call(&mut self, chain: &mut Chain, name: Name, args: &[RpnExpr]) {
        let params: Vec<bool> = self
            .modules
            .get(&name)
            .unwrap_or_else(|| panic!("call to unknown module survived the decorator"))
            .params
            .iter()
            .map(|p| p.by_ref)
            .collect();

        let mut specs = Vec::with_capacity(args.len());
        for (&by_ref, arg) in params.iter().zip(args) {
            if by_ref {
                let (var, indices) = variable_reference(arg);
                for index in indices {
                    self.lower_expr(chain, index);
                }
                specs.push(ArgSpec::ByRef {
                    name: var,
                    index_count: count(indices),
                    dims: self.variable(var).dims().to_vec(),
                });
            } else {
                self.lower_expr(chain, arg);
                specs.push(ArgSpec::ByValue);
            }
        }
        chain.push(self.graph, NodeKind::CallModule { name, args: specs });
    }

    /// Two-level lookup: the module's own table, then the main table.
    fn variable(&self, name: Name) -> &Variable {
        self.tables[&self.module]
            .get(name)
            .or_else(|| self.tables[&self.main_name].get(name))
            .unwrap_or_else(|| panic!("undeclared variable survived the decorator"))
    }
}

/// The single `Load` behind a by-reference or `leer` argument. The
/// decorator guarantees the shape.
fn variable_reference(arg: &RpnExpr) -> (Name, &[RpnExpr]) {
    match arg.as_slice() {
        [ExprElem::Load { name, indices, .. }] => (*name, indices),
        _ => panic!("non-variable reference argument survived the decorator"),
    }
}

fn count(indices: &[RpnExpr]) -> u32 {
    u32::try_from(indices.len()).unwrap_or_else(|_| panic!("index rank exceeds u32"))
}
