//! Execution back end for PsC: graph lowering and the stepping evaluator.
//!
//! A checked program is lowered into a flat graph of primitive nodes
//! ([`lower`]), then executed one node at a time by the [`Evaluator`].
//! The machine suspends instead of blocking when the program reads input,
//! so hosts (the CLI, a future playground) stay in control of I/O and
//! scheduling. The [`Interpreter`] wraps the step loop into coarse host
//! events.

mod error;
mod evaluator;
mod graph;
mod index;
mod interpreter;
mod lower;
mod program;

pub use error::{BoundsViolation, EvalError};
pub use evaluator::{EvalState, Evaluator, StepReport};
pub use graph::{ArgSpec, Graph, Node, NodeId, NodeKind};
pub use interpreter::{Event, Interpreter};
pub use lower::lower;
pub use program::Program;
