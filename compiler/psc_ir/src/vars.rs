//! Variable storage: typed cells and per-module tables.

use rustc_hash::FxHashMap;

use crate::{Name, Type, Value};

/// A named, typed storage cell: a scalar or a flat array.
///
/// The array tag and dimension vector are fixed at declaration time. Cells
/// start unset and become concrete only after an assignment executes;
/// reading an unset cell resolves to the declared type's default.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    ty: Type,
    /// Declared dimensions; empty for scalars.
    dims: Vec<u32>,
    /// Flat storage, sized to the product of `dims` (1 for scalars).
    cells: Vec<Option<Value>>,
}

impl Variable {
    /// Create a scalar variable with an unset cell.
    pub fn scalar(ty: Type) -> Self {
        Variable {
            ty,
            dims: Vec::new(),
            cells: vec![None],
        }
    }

    /// Create an array variable sized to the product of its dimensions.
    pub fn array(ty: Type, dims: Vec<u32>) -> Self {
        debug_assert!(!dims.is_empty(), "array variable needs dimensions");
        let count = dims.iter().map(|&d| d as usize).product();
        Variable {
            ty,
            dims,
            cells: vec![None; count],
        }
    }

    #[inline]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        !self.dims.is_empty()
    }

    /// Declared dimension vector; empty for scalars.
    #[inline]
    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    /// Total number of cells (1 for scalars).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Raw cell access. `None` means the cell was never assigned.
    pub fn get(&self, offset: usize) -> Option<&Value> {
        self.cells[offset].as_ref()
    }

    /// Cell value, resolving unset cells to the declared type's default.
    pub fn get_or_default(&self, offset: usize) -> Value {
        self.cells[offset]
            .clone()
            .unwrap_or_else(|| Value::default_of(self.ty))
    }

    /// Store a value into a cell. Callers bounds-check the offset first.
    pub fn set(&mut self, offset: usize, value: Value) {
        self.cells[offset] = Some(value);
    }

    /// Clear every cell back to unset.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

/// One module's variable table.
///
/// Built once by the declarator and owned for the whole program run. The
/// main module's table doubles as the global scope for lexical fallback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VarTable {
    vars: FxHashMap<Name, Variable>,
}

impl VarTable {
    pub fn new() -> Self {
        VarTable {
            vars: FxHashMap::default(),
        }
    }

    /// Insert a variable. Returns `false` (leaving the table unchanged) if
    /// the name is already declared.
    pub fn insert(&mut self, name: Name, var: Variable) -> bool {
        if self.vars.contains_key(&name) {
            return false;
        }
        self.vars.insert(name, var);
        true
    }

    pub fn get(&self, name: Name) -> Option<&Variable> {
        self.vars.get(&name)
    }

    pub fn get_mut(&mut self, name: Name) -> Option<&mut Variable> {
        self.vars.get_mut(&name)
    }

    pub fn contains(&self, name: Name) -> bool {
        self.vars.contains_key(&name)
    }

    /// Reset every variable back to unset cells. Used when a callee's
    /// table is re-initialized at call time.
    pub fn reset_all(&mut self) {
        for var in self.vars.values_mut() {
            var.reset();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Variable)> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar_starts_unset() {
        let v = Variable::scalar(Type::Entero);
        assert_eq!(v.get(0), None);
        assert_eq!(v.get_or_default(0), Value::Int(0));
    }

    #[test]
    fn array_sizes_to_dimension_product() {
        let v = Variable::array(Type::Real, vec![3, 4]);
        assert_eq!(v.cell_count(), 12);
        assert!(v.is_array());
        assert_eq!(v.dims(), &[3, 4]);
    }

    #[test]
    fn set_then_get() {
        let mut v = Variable::array(Type::Entero, vec![5]);
        v.set(2, Value::Int(7));
        assert_eq!(v.get(2), Some(&Value::Int(7)));
        assert_eq!(v.get(3), None);
        v.reset();
        assert_eq!(v.get(2), None);
    }

    #[test]
    fn table_rejects_duplicates() {
        let mut table = VarTable::new();
        let name = Name::from_raw(1);
        assert!(table.insert(name, Variable::scalar(Type::Entero)));
        assert!(!table.insert(name, Variable::scalar(Type::Real)));
        assert_eq!(table.len(), 1);
    }
}
