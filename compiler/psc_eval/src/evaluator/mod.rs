//! The stepping evaluator.
//!
//! Executes exactly one graph node per [`Evaluator::step`] against a
//! value stack and an explicit call stack, so a host can single-step,
//! inspect variables between steps, and suspend on read requests without
//! blocking a thread.
//!
//! Errors raised by the *program* (bad indices, division by zero) move
//! the machine into its error state. Defects in the *graph* — stack
//! underflow, an unknown callee — are toolchain bugs and panic.

mod ops;


use psc_ir::{Name, StringInterner, Type, Value, VarTable, Variable, MAIN_MODULE};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::graph::{ArgSpec, NodeId, NodeKind};
use crate::index::flat_offset;
use crate::program::Program;
use crate::EvalError;

/// What one `step()` did.
#[derive(Clone, Debug, PartialEq)]
pub enum StepReport {
    /// Internal progress; nothing for the host to do.
    Continue,
    /// The program produced output.
    Write(Value),
    /// The program needs one input value of the given type. The machine
    /// is paused until [`Evaluator::input`] supplies it.
    Read { ty: Type },
    /// Execution finished.
    Done,
    /// Execution halted on a runtime error.
    Error(EvalError),
}

/// Machine state between steps.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum EvalState {
    Running,
    /// Suspended on a read request.
    Paused,
    Done,
    Error,
}

/// A suspended call: where to resume, whose scope to restore, and the
/// caller's own by-reference bindings.
struct Frame {
    resume: Option<NodeId>,
    module: Name,
    aliases: FxHashMap<Name, Alias>,
}

/// One by-reference binding: for the duration of the call, every read and
/// write of the parameter goes through `var`'s cell at `offset` in
/// `owner`'s table.
#[derive(Clone)]
struct Alias {
    owner: Name,
    var: Name,
    offset: usize,
}

/// What a call passes for one parameter.
enum Binding {
    Value(Value),
    Slot(Alias),
}

/// A read request whose target cell was resolved before suspending.
struct PendingRead {
    owner: Name,
    var: Name,
    offset: usize,
    ty: Type,
}

/// The stepping state machine.
pub struct Evaluator<'a> {
    program: Program,
    interner: &'a StringInterner,
    /// Operand stack, shared across calls: a function's return value is
    /// simply left on it for the caller's expression.
    stack: Vec<Value>,
    frames: Vec<Frame>,
    /// The current call's by-reference bindings, keyed by parameter name.
    aliases: FxHashMap<Name, Alias>,
    /// Node to execute next; `None` at the end of a module's chain.
    current: Option<NodeId>,
    /// Module whose table scopes variable lookups.
    module: Name,
    main_name: Name,
    state: EvalState,
    pending_read: Option<PendingRead>,
    pending_input: Option<Value>,
    error: Option<EvalError>,
}

impl<'a> Evaluator<'a> {
    pub fn new(program: Program, interner: &'a StringInterner) -> Self {
        let main_name = interner.intern(MAIN_MODULE);
        let current = program.roots.get(&main_name).copied().flatten();
        Evaluator {
            program,
            interner,
            stack: Vec::new(),
            frames: Vec::new(),
            aliases: FxHashMap::default(),
            current,
            module: main_name,
            main_name,
            state: EvalState::Running,
            pending_read: None,
            pending_input: None,
            error: None,
        }
    }

    pub fn state(&self) -> EvalState {
        self.state
    }

    /// The current module's variable table.
    pub fn locals(&self) -> &VarTable {
        &self.program.tables[&self.module]
    }

    /// The main module's variable table.
    pub fn globals(&self) -> &VarTable {
        &self.program.tables[&self.main_name]
    }

    /// Any module's variable table by name, for host inspection between
    /// steps.
    pub fn locals_of(&self, module: Name) -> Option<&VarTable> {
        self.program.tables.get(&module)
    }

    /// Supply the value for the outstanding read request. The next
    /// `step()` performs the assignment and resumes.
    ///
    /// # Panics
    /// Panics if no read is outstanding.
    pub fn input(&mut self, value: Value) {
        assert!(
            self.state == EvalState::Paused && self.pending_read.is_some(),
            "input provided while no read is outstanding"
        );
        self.pending_input = Some(value);
    }

    /// True while a read request is outstanding and unanswered.
    pub fn awaiting_input(&self) -> bool {
        self.state == EvalState::Paused && self.pending_input.is_none()
    }

    /// Host-initiated stop. The machine reports `Done` from here on.
    pub fn abort(&mut self) {
        if self.state != EvalState::Error {
            self.state = EvalState::Done;
        }
    }

    /// Execute one node (or resume from a suspended read).
    pub fn step(&mut self) -> StepReport {
        match self.state {
            EvalState::Done => StepReport::Done,
            EvalState::Error => {
                let error = self
                    .error
                    .clone()
                    .unwrap_or_else(|| panic!("error state without a recorded error"));
                StepReport::Error(error)
            }
            EvalState::Paused => self.resume_read(),
            EvalState::Running => {
                let Some(id) = self.current else {
                    return self.end_of_chain();
                };
                match self.exec(id) {
                    Ok(report) => report,
                    Err(error) => self.fail(error),
                }
            }
        }
    }

    /// A module's chain ran out: the program is done, or a callee fell
    /// off its end (a procedure without `retornar`).
    fn end_of_chain(&mut self) -> StepReport {
        if self.frames.is_empty() {
            self.state = EvalState::Done;
            return StepReport::Done;
        }
        self.return_to_caller();
        StepReport::Continue
    }

    fn fail(&mut self, error: EvalError) -> StepReport {
        self.state = EvalState::Error;
        self.error = Some(error.clone());
        StepReport::Error(error)
    }

    fn exec(&mut self, id: NodeId) -> Result<StepReport, EvalError> {
        let node = self.program.graph.node(id).clone();
        trace!(node = id.index(), kind = ?node.kind, "step");

        match node.kind {
            NodeKind::Push(value) => {
                self.stack.push(value);
            }
            NodeKind::Pop => {
                self.pop();
            }
            NodeKind::Load(name) => {
                let (owner, var, offset) = self.resolve_slot(name, 0);
                let value = self.variable(owner, var).get_or_default(offset);
                self.stack.push(value);
            }
            NodeKind::LoadIndexed {
                name,
                index_count,
                dims,
            } => {
                let indices = self.pop_indices(index_count)?;
                let offset = flat_offset(self.interner.lookup(name), &indices, &dims)?;
                let (owner, var, offset) = self.resolve_slot(name, offset);
                let value = self.variable(owner, var).get_or_default(offset);
                self.stack.push(value);
            }
            NodeKind::Unary(op) => {
                let value = self.pop();
                self.stack.push(ops::unary(op, value)?);
            }
            NodeKind::Binary(op) => {
                let rhs = self.pop();
                let lhs = self.pop();
                self.stack.push(ops::binary(op, lhs, rhs)?);
            }
            NodeKind::Assign(name) => {
                let value = self.pop();
                self.store(name, 0, value)?;
            }
            NodeKind::AssignIndexed {
                name,
                index_count,
                dims,
            } => {
                // Value on top (pushed last), indices beneath it.
                let value = self.pop();
                let indices = self.pop_indices(index_count)?;
                let offset = flat_offset(self.interner.lookup(name), &indices, &dims)?;
                self.store(name, offset, value)?;
            }
            NodeKind::CallModule { name, args } => {
                return self.call_module(name, &args, node.next);
            }
            NodeKind::ReadCall {
                name,
                index_count,
                dims,
                ty,
            } => {
                let indices = self.pop_indices(index_count)?;
                let offset = flat_offset(self.interner.lookup(name), &indices, &dims)?;
                let (owner, var, offset) = self.resolve_slot(name, offset);
                self.pending_read = Some(PendingRead {
                    owner,
                    var,
                    offset,
                    ty,
                });
                self.state = EvalState::Paused;
                return Ok(StepReport::Read { ty });
            }
            NodeKind::WriteCall => {
                let value = self.pop();
                self.current = node.next;
                return Ok(StepReport::Write(value));
            }
            NodeKind::Branch {
                true_root,
                false_root,
            } => {
                let target = if self.pop_condition()? {
                    true_root
                } else {
                    false_root
                };
                // A missing arm falls through to the convergence node.
                self.current = target.or(node.next);
                return Ok(StepReport::Continue);
            }
            NodeKind::Loop {
                body_root,
                cond_head,
                negate,
            } => {
                let entered = self.pop_condition()? != negate;
                self.current = if entered {
                    // An empty body cycles straight back to the condition.
                    Some(body_root.unwrap_or(cond_head))
                } else {
                    node.next
                };
                return Ok(StepReport::Continue);
            }
            NodeKind::Return => {
                self.return_to_caller();
                return Ok(StepReport::Continue);
            }
        }

        self.current = node.next;
        Ok(StepReport::Continue)
    }

    /// Second half of a read: the host supplied a value, store it and
    /// move on. Without input yet, re-report the outstanding request.
    fn resume_read(&mut self) -> StepReport {
        let Some(pending) = &self.pending_read else {
            panic!("paused without a pending read");
        };
        let ty = pending.ty;
        let Some(value) = self.pending_input.take() else {
            return StepReport::Read { ty };
        };

        let Some(pending) = self.pending_read.take() else {
            panic!("paused without a pending read");
        };
        // Coerce to the storage type: through an alias the slot's declared
        // type governs, same as any other store.
        let storage_ty = self.variable(pending.owner, pending.var).ty();
        let value = match ops::coerce(value, storage_ty) {
            Ok(value) => value,
            Err(error) => return self.fail(error),
        };
        self.variable_mut(pending.owner, pending.var)
            .set(pending.offset, value);
        self.state = EvalState::Running;

        let Some(id) = self.current else {
            panic!("pending read without a current node");
        };
        self.current = self.program.graph.node(id).next;
        StepReport::Continue
    }

    /// Pop argument data (reverse argument order), re-initialize the
    /// callee's table, bind parameters, and transfer control. By-value
    /// arguments copy into the callee's cells; by-reference arguments
    /// become aliases of the caller's slot.
    fn call_module(
        &mut self,
        name: Name,
        args: &[ArgSpec],
        resume: Option<NodeId>,
    ) -> Result<StepReport, EvalError> {
        let params: Vec<(Name, Type)> = self
            .program
            .modules
            .get(&name)
            .unwrap_or_else(|| panic!("call to unknown module at runtime"))
            .params
            .iter()
            .map(|p| (p.name, p.ty))
            .collect();
        assert_eq!(params.len(), args.len(), "call arity survived the decorator");

        let mut bindings: Vec<Binding> = Vec::with_capacity(args.len());
        for spec in args.iter().rev() {
            match spec {
                ArgSpec::ByValue => bindings.push(Binding::Value(self.pop())),
                ArgSpec::ByRef {
                    name: var,
                    index_count,
                    dims,
                } => {
                    let indices = self.pop_indices(*index_count)?;
                    let offset = flat_offset(self.interner.lookup(*var), &indices, dims)?;
                    // Passing a `var` parameter onward aliases the
                    // original slot, not the intermediate parameter.
                    let (owner, var, offset) = self.resolve_slot(*var, offset);
                    bindings.push(Binding::Slot(Alias { owner, var, offset }));
                }
            }
        }
        bindings.reverse();

        // One table per module: a call starts from fresh unset cells.
        self.table_mut(name).reset_all();
        let mut aliases = FxHashMap::default();
        for ((param, ty), binding) in params.into_iter().zip(bindings) {
            match binding {
                Binding::Value(value) => {
                    let value = ops::coerce(value, ty)?;
                    self.variable_mut(name, param).set(0, value);
                }
                Binding::Slot(alias) => {
                    aliases.insert(param, alias);
                }
            }
        }

        self.frames.push(Frame {
            resume,
            module: self.module,
            aliases: std::mem::replace(&mut self.aliases, aliases),
        });
        self.module = name;
        self.current = self.program.roots[&name];
        Ok(StepReport::Continue)
    }

    /// Restore the caller's scope and bindings, and resume after the call
    /// node. With no frame left, the main module returned: the run is
    /// done.
    fn return_to_caller(&mut self) {
        let Some(frame) = self.frames.pop() else {
            self.state = EvalState::Done;
            self.current = None;
            return;
        };
        self.aliases = frame.aliases;
        self.module = frame.module;
        self.current = frame.resume;
    }

    fn store(&mut self, name: Name, offset: usize, value: Value) -> Result<(), EvalError> {
        let (owner, var, offset) = self.resolve_slot(name, offset);
        let ty = self.variable(owner, var).ty();
        let value = ops::coerce(value, ty)?;
        self.variable_mut(owner, var).set(offset, value);
        Ok(())
    }

    /// Where a name's cell actually lives: through its by-reference alias
    /// when one is bound, otherwise two-level scoping (the current
    /// module's table, then main's).
    fn resolve_slot(&self, name: Name, offset: usize) -> (Name, Name, usize) {
        if let Some(alias) = self.aliases.get(&name) {
            (alias.owner, alias.var, alias.offset + offset)
        } else if self.program.tables[&self.module].contains(name) {
            (self.module, name, offset)
        } else {
            (self.main_name, name, offset)
        }
    }

    fn variable(&self, owner: Name, name: Name) -> &Variable {
        self.program.tables[&owner]
            .get(name)
            .unwrap_or_else(|| panic!("undeclared variable at runtime"))
    }

    fn variable_mut(&mut self, owner: Name, name: Name) -> &mut Variable {
        self.table_mut(owner)
            .get_mut(name)
            .unwrap_or_else(|| panic!("undeclared variable at runtime"))
    }

    fn table_mut(&mut self, owner: Name) -> &mut VarTable {
        self.program
            .tables
            .get_mut(&owner)
            .unwrap_or_else(|| panic!("unknown module table at runtime"))
    }

    fn pop(&mut self) -> Value {
        self.stack
            .pop()
            .unwrap_or_else(|| panic!("value stack underflow: malformed graph"))
    }

    /// Pop `count` index values in reverse push order.
    fn pop_indices(&mut self, count: u32) -> Result<SmallVec<[i64; 4]>, EvalError> {
        let mut indices = SmallVec::with_capacity(count as usize);
        for _ in 0..count {
            match self.pop() {
                Value::Int(n) => indices.push(n),
                value => {
                    return Err(EvalError::InvalidOperands {
                        op: "[]".to_owned(),
                        detail: format!("los indices deben ser enteros, no {}", value.kind_name()),
                    });
                }
            }
        }
        indices.reverse();
        Ok(indices)
    }

    fn pop_condition(&mut self) -> Result<bool, EvalError> {
        match self.pop() {
            Value::Bool(b) => Ok(b),
            value => Err(EvalError::InvalidOperands {
                op: "condicion".to_owned(),
                detail: format!("se esperaba logico, no {}", value.kind_name()),
            }),
        }
    }
}
