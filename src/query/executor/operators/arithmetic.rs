// Arithmetic Operators
//
// Elementwise ADD and SUB over equal-length vectors. No rounding happens here.

use crate::common::{Value, ValueVector};
use crate::query::executor::result::{OracleError, OracleResult};
use super::ArithmeticOp;

fn apply(op: ArithmeticOp, a: Value, b: Value) -> OracleResult<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => {
            let r = match op {
                ArithmeticOp::Add => x.checked_add(y),
                ArithmeticOp::Sub => x.checked_sub(y),
            };
            r.map(Value::Int).ok_or(OracleError::NumericOverflow)
        }
        (x, y) => Ok(Value::Float(match op {
            ArithmeticOp::Add => x.as_f64() + y.as_f64(),
            ArithmeticOp::Sub => x.as_f64() - y.as_f64(),
        })),
    }
}

/// `out[i] = left[i] op right[i]`
pub fn elementwise(
    op: ArithmeticOp,
    left: &ValueVector,
    right: &ValueVector,
) -> OracleResult<ValueVector> {
    if left.len() != right.len() {
        return Err(OracleError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    left.iter()
        .zip(right.iter())
        .map(|(a, b)| apply(op, *a, *b))
        .collect::<OracleResult<Vec<_>>>()
        .map(ValueVector::new)
}

pub fn add(left: &ValueVector, right: &ValueVector) -> OracleResult<ValueVector> {
    elementwise(ArithmeticOp::Add, left, right)
}

pub fn sub(left: &ValueVector, right: &ValueVector) -> OracleResult<ValueVector> {
    elementwise(ArithmeticOp::Sub, left, right)
}
