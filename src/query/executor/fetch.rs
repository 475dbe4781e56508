// Projection/Fetch Operator

use crate::catalog::Column;
use crate::common::{PositionSet, ValueVector};
use crate::query::executor::result::{OracleError, OracleResult};

/// Values of `column` at `positions`, in position order.
///
/// An out-of-range position means the positions were computed against a
/// different table generation; that is a caller bug and is reported as an
/// error rather than truncated.
pub fn fetch(column: &Column, positions: &PositionSet) -> OracleResult<ValueVector> {
    positions
        .iter()
        .map(|pos| {
            column.get(pos).copied().ok_or(OracleError::PositionOutOfRange {
                position: pos,
                len: column.len(),
            })
        })
        .collect::<OracleResult<Vec<_>>>()
        .map(ValueVector::new)
}

/// Every value of `column` in row order
pub fn scan(column: &Column) -> ValueVector {
    ValueVector::new(column.values().to_vec())
}
