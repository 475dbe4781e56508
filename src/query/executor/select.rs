// Selection Evaluator
//
// Range selection over a column with half-open `[low, high)` semantics.
// Either bound may be unbounded. An optional input position set restricts
// evaluation to those rows, which is how chained (AND) selections compose.

use crate::catalog::Column;
use crate::common::{Bound, PositionSet, Value, ValueVector};
use crate::query::executor::result::{OracleError, OracleResult};

fn in_range(v: &Value, low: &Bound, high: &Bound) -> bool {
    low.admits_from_below(v) && high.admits_from_above(v)
}

/// Positions of `column` whose value lies in `[low, high)`.
///
/// With `input`, only rows at those positions are tested and the result is a
/// subset of `input` (positions are not reindexed). An empty result is valid.
pub fn select(
    column: &Column,
    low: Bound,
    high: Bound,
    input: Option<&PositionSet>,
) -> OracleResult<PositionSet> {
    let mut out = PositionSet::new();

    match input {
        None => {
            for (pos, v) in column.values().iter().enumerate() {
                if in_range(v, &low, &high) {
                    out.push(pos);
                }
            }
        }
        Some(positions) => {
            if let Some(last) = positions.last() {
                if last >= column.len() {
                    return Err(OracleError::PositionOutOfRange {
                        position: last,
                        len: column.len(),
                    });
                }
            }
            for pos in positions.iter() {
                if in_range(&column.values()[pos], &low, &high) {
                    out.push(pos);
                }
            }
        }
    }

    Ok(out)
}

/// Chained selection driven by an already-fetched vector: `values[i]` is the
/// value at `positions[i]`. Returns the positions whose paired value lies in
/// `[low, high)`.
///
/// Agrees with `select(column, low, high, Some(positions))` whenever `values`
/// was fetched from `column` at `positions`.
pub fn select_fetched(
    positions: &PositionSet,
    values: &ValueVector,
    low: Bound,
    high: Bound,
) -> OracleResult<PositionSet> {
    if positions.len() != values.len() {
        return Err(OracleError::LengthMismatch {
            left: positions.len(),
            right: values.len(),
        });
    }

    let mut out = PositionSet::new();
    for (pos, v) in positions.iter().zip(values.iter()) {
        if in_range(v, &low, &high) {
            out.push(pos);
        }
    }
    Ok(out)
}
