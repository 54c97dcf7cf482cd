//! Value-level operator semantics.
//!
//! Integer arithmetic stays integral (`/` and `%` truncate); any real
//! operand promotes the whole operation to real. Strings support
//! concatenation and lexicographic comparison; booleans support the
//! logical operators and equality. Everything else is an operand error.

use psc_ir::{BinaryOp, Type, UnaryOp, Value};

use crate::EvalError;

pub(crate) fn unary(op: UnaryOp, value: Value) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| overflow("-")),
        (UnaryOp::Neg, Value::Real(x)) => Ok(Value::Real(-x)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (op, value) => Err(invalid(op.to_string(), &[&value])),
    }
}

pub(crate) fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    use BinaryOp::{Add, And, Div, Eq, Ge, Gt, Le, Lt, Mod, Mul, Ne, Or, Sub};

    match (op, &lhs, &rhs) {
        // Integral arithmetic.
        (Add, Value::Int(a), Value::Int(b)) => {
            a.checked_add(*b).map(Value::Int).ok_or_else(|| overflow("+"))
        }
        (Sub, Value::Int(a), Value::Int(b)) => {
            a.checked_sub(*b).map(Value::Int).ok_or_else(|| overflow("-"))
        }
        (Mul, Value::Int(a), Value::Int(b)) => {
            a.checked_mul(*b).map(Value::Int).ok_or_else(|| overflow("*"))
        }
        (Div, Value::Int(_), Value::Int(0)) | (Mod, Value::Int(_), Value::Int(0)) => {
            Err(EvalError::DivisionByZero)
        }
        (Div, Value::Int(a), Value::Int(b)) => {
            a.checked_div(*b).map(Value::Int).ok_or_else(|| overflow("/"))
        }
        (Mod, Value::Int(a), Value::Int(b)) => {
            a.checked_rem(*b).map(Value::Int).ok_or_else(|| overflow("%"))
        }

        // Mixed or real arithmetic promotes to real.
        (Add | Sub | Mul | Div | Mod, _, _) if numeric_pair(&lhs, &rhs) => {
            let (a, b) = (as_real(&lhs), as_real(&rhs));
            if matches!(op, Div | Mod) && b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::Real(match op {
                Add => a + b,
                Sub => a - b,
                Mul => a * b,
                Div => a / b,
                Mod => a % b,
                _ => unreachable!("arm is guarded to arithmetic operators"),
            }))
        }

        // String concatenation.
        (Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),

        // Comparisons.
        (Eq | Ne | Lt | Le | Gt | Ge, Value::Int(a), Value::Int(b)) => {
            Ok(Value::Bool(compare(op, Some(a.cmp(b)))))
        }
        (Eq | Ne | Lt | Le | Gt | Ge, _, _) if numeric_pair(&lhs, &rhs) => {
            let (a, b) = (as_real(&lhs), as_real(&rhs));
            Ok(Value::Bool(compare(op, a.partial_cmp(&b))))
        }
        (Eq | Ne | Lt | Le | Gt | Ge, Value::Str(a), Value::Str(b)) => {
            Ok(Value::Bool(compare(op, Some(a.cmp(b)))))
        }
        (Eq, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a == b)),
        (Ne, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a != b)),

        // Logical operators.
        (And, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
        (Or, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),

        _ => Err(invalid(op.to_string(), &[&lhs, &rhs])),
    }
}

/// Adapt a value to a declared storage type. Numerics convert both ways
/// (reals truncate into `entero`); everything else must already match.
pub(crate) fn coerce(value: Value, ty: Type) -> Result<Value, EvalError> {
    match (ty, value) {
        (Type::Entero, Value::Int(n)) => Ok(Value::Int(n)),
        #[expect(clippy::cast_possible_truncation, reason = "truncation into entero is the conversion rule")]
        (Type::Entero, Value::Real(x)) => Ok(Value::Int(x.trunc() as i64)),
        (Type::Real, Value::Real(x)) => Ok(Value::Real(x)),
        #[expect(clippy::cast_precision_loss, reason = "widening into real is the conversion rule")]
        (Type::Real, Value::Int(n)) => Ok(Value::Real(n as f64)),
        (Type::Logico, Value::Bool(b)) => Ok(Value::Bool(b)),
        (ty, Value::Str(s)) if ty.is_textual() => Ok(Value::Str(s)),
        (ty, value) => Err(EvalError::InvalidOperands {
            op: "<-".to_owned(),
            detail: format!("{} no es asignable a {}", value.kind_name(), ty.keyword()),
        }),
    }
}

fn numeric_pair(lhs: &Value, rhs: &Value) -> bool {
    matches!(lhs, Value::Int(_) | Value::Real(_)) && matches!(rhs, Value::Int(_) | Value::Real(_))
}

fn as_real(value: &Value) -> f64 {
    match value.as_f64() {
        Some(x) => x,
        None => panic!("numeric_pair admitted a non-numeric value"),
    }
}

fn compare(op: BinaryOp, ordering: Option<std::cmp::Ordering>) -> bool {
    use std::cmp::Ordering::{Equal, Greater, Less};
    match ordering {
        Some(ordering) => match op {
            BinaryOp::Eq => ordering == Equal,
            BinaryOp::Ne => ordering != Equal,
            BinaryOp::Lt => ordering == Less,
            BinaryOp::Le => ordering != Greater,
            BinaryOp::Gt => ordering == Greater,
            BinaryOp::Ge => ordering != Less,
            _ => panic!("compare called with a non-comparison operator"),
        },
        // NaN compares unequal to everything.
        None => matches!(op, BinaryOp::Ne),
    }
}

fn overflow(op: &str) -> EvalError {
    EvalError::InvalidOperands {
        op: op.to_owned(),
        detail: "desbordamiento de entero".to_owned(),
    }
}

fn invalid(op: String, operands: &[&Value]) -> EvalError {
    let kinds: Vec<&str> = operands.iter().map(|v| v.kind_name()).collect();
    EvalError::InvalidOperands {
        op,
        detail: kinds.join(" y "),
    }
}
