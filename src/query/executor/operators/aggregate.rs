// Aggregation Operators
//
// SUM, AVG, MIN and MAX over a value vector.

use std::cmp::Ordering;

use crate::common::{Value, ValueVector};
use crate::query::executor::result::{OracleError, OracleResult};
use super::AggregateType;

/// Decimal places kept by AVG
pub const AVG_DECIMAL_PLACES: i32 = 2;

/// Round half-to-even at `places` decimals. Scales, rounds, then unscales,
/// so `x.xx5` ties resolve on the scaled binary value.
pub fn round_half_even(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round_ties_even() / scale
}

/// Result of an aggregate. AVG keeps its own variant because an empty AVG
/// is NaN and must only ever reach the formatter, never another comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Value(Value),
    Average(f64),
}

/// Sum of all values. Empty input sums to integer zero.
/// Integer sums are exact; any float operand makes the sum a float.
pub fn sum(values: &ValueVector) -> OracleResult<Value> {
    let mut acc = Value::Int(0);
    for v in values.iter() {
        acc = match (acc, *v) {
            (Value::Int(a), Value::Int(b)) => {
                Value::Int(a.checked_add(b).ok_or(OracleError::NumericOverflow)?)
            }
            (a, b) => Value::Float(a.as_f64() + b.as_f64()),
        };
    }
    Ok(acc)
}

/// Arithmetic mean rounded once to two decimals, half-to-even.
/// Empty input yields NaN; the formatter renders that as `0.00`.
pub fn avg(values: &ValueVector) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let all_int = values.iter().all(|v| !v.is_float());
    let total = if all_int {
        // i128 cannot overflow for any realistic vector of i64
        values
            .iter()
            .map(|v| match v {
                Value::Int(i) => *i as i128,
                Value::Float(_) => 0,
            })
            .sum::<i128>() as f64
    } else {
        values.iter().map(Value::as_f64).sum::<f64>()
    };

    round_half_even(total / values.len() as f64, AVG_DECIMAL_PLACES)
}

fn extreme(values: &ValueVector, agg: AggregateType, keep: Ordering) -> OracleResult<Value> {
    let mut iter = values.iter();
    let mut best = *iter.next().ok_or(OracleError::EmptyAggregate(agg))?;
    for v in iter {
        if v.partial_cmp(&best) == Some(keep) {
            best = *v;
        }
    }
    Ok(best)
}

/// Smallest value. Empty input is a precondition violation.
pub fn min(values: &ValueVector) -> OracleResult<Value> {
    extreme(values, AggregateType::Min, Ordering::Less)
}

/// Largest value. Empty input is a precondition violation.
pub fn max(values: &ValueVector) -> OracleResult<Value> {
    extreme(values, AggregateType::Max, Ordering::Greater)
}

/// Dispatch on the aggregate kind
pub fn aggregate(agg: AggregateType, values: &ValueVector) -> OracleResult<Scalar> {
    match agg {
        AggregateType::Sum => sum(values).map(Scalar::Value),
        AggregateType::Avg => Ok(Scalar::Average(avg(values))),
        AggregateType::Min => min(values).map(Scalar::Value),
        AggregateType::Max => max(values).map(Scalar::Value),
    }
}
