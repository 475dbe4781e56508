// Oracle Operators Module
//
// Aggregation and elementwise arithmetic over value vectors.

pub mod aggregate;
pub mod arithmetic;

pub use aggregate::{Scalar, aggregate, avg, max, min, sum};
pub use arithmetic::{add, elementwise, sub};

use serde::{Deserialize, Serialize};

/// Types of supported aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateType {
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateType {
    /// Function name in the command language
    pub fn name(&self) -> &'static str {
        match self {
            AggregateType::Sum => "sum",
            AggregateType::Avg => "avg",
            AggregateType::Min => "min",
            AggregateType::Max => "max",
        }
    }
}

/// Elementwise binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Sub,
}

impl ArithmeticOp {
    /// Function name in the command language
    pub fn name(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
        }
    }
}
