//! 1-based row-major array addressing.

use crate::{BoundsViolation, EvalError};

/// Flatten a 1-based index vector against a dimension vector.
///
/// Row-major: the last index varies fastest, so the cell offset is
/// `sum((idx[i] - 1) * product(dims[i+1..]))`. Every index is checked
/// against its own dimension before any arithmetic; the first violation
/// wins.
///
/// # Panics
/// Panics if `indices.len() != dims.len()`; the decorator rejects rank
/// mismatches before lowering.
pub(crate) fn flat_offset(name: &str, indices: &[i64], dims: &[u32]) -> Result<usize, EvalError> {
    assert_eq!(
        indices.len(),
        dims.len(),
        "index rank mismatch survived the decorator"
    );

    for (position, (&index, &dim)) in indices.iter().zip(dims).enumerate() {
        let reason = if index < 1 {
            BoundsViolation::BelowLowerBound
        } else if index > i64::from(dim) {
            BoundsViolation::AboveUpperBound
        } else {
            continue;
        };
        return Err(EvalError::OutOfBounds {
            name: name.to_owned(),
            bad_index: index,
            dimension: position + 1,
            dimensions: dims.to_vec(),
            reason,
        });
    }

    let mut offset = 0usize;
    let mut stride = 1usize;
    for (&index, &dim) in indices.iter().zip(dims).rev() {
        #[expect(clippy::cast_sign_loss, reason = "bounds check above guarantees index >= 1")]
        let zero_based = (index - 1) as usize;
        offset += zero_based * stride;
        stride *= dim as usize;
    }
    Ok(offset)
}
