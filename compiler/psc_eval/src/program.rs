//! A fully lowered, runnable program.

use psc_ir::{ModuleDef, Name, VarTable};
use rustc_hash::FxHashMap;

use crate::graph::{Graph, NodeId};

/// Lowering output: the checked modules and their storage, plus the node
/// graph and each module's entry point.
///
/// A module with an empty body has a `None` root; running it completes
/// immediately.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub modules: FxHashMap<Name, ModuleDef>,
    pub tables: FxHashMap<Name, VarTable>,
    pub graph: Graph,
    pub roots: FxHashMap<Name, Option<NodeId>>,
}
