//! Runtime values.

use std::fmt;

use crate::Type;

/// Runtime value in the PsC evaluator.
///
/// Values are small and single-threaded; `String` payloads are cloned
/// freely (teaching-scale programs, no shared heap).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Integer value (`entero`).
    Int(i64),
    /// Floating-point value (`real`).
    Real(f64),
    /// Boolean value (`logico`).
    Bool(bool),
    /// Text value (`caracter` or `cadena`).
    Str(String),
}

impl Value {
    /// The default value a cell of type `ty` resolves to before any
    /// assignment has executed.
    pub fn default_of(ty: Type) -> Value {
        match ty {
            Type::Entero => Value::Int(0),
            Type::Real => Value::Real(0.0),
            Type::Logico => Value::Bool(false),
            Type::Caracter | Type::Cadena => Value::Str(String::new()),
        }
    }

    /// Short kind name for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "entero",
            Value::Real(_) => "real",
            Value::Bool(_) => "logico",
            Value::Str(_) => "cadena",
        }
    }

    /// Numeric view as `f64`, if this value is numeric.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Real(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Real(x) => write!(f, "{x}"),
            Value::Bool(true) => f.write_str("Verdadero"),
            Value::Bool(false) => f.write_str("Falso"),
            Value::Str(s) => f.write_str(s),
        }
    }
}
