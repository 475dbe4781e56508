// Oracle Result Types
//
// Error taxonomy for the oracle core. Every variant is a precondition
// violation: the caller built an invalid plan or fixture. Defined empty
// results (empty selection, empty sum, empty average) are not errors.

use thiserror::Error;

use crate::common::Position;
use crate::query::executor::operators::AggregateType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// Fetch referenced a position past the end of the column
    #[error("Position {position} out of range for column of {len} rows")]
    PositionOutOfRange { position: Position, len: usize },
    /// Elementwise operands or print arguments differ in length
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// MIN/MAX over an empty vector
    #[error("{0:?} over an empty vector is undefined")]
    EmptyAggregate(AggregateType),
    /// Integer arithmetic overflowed
    #[error("Numeric overflow")]
    NumericOverflow,
    /// Table not found
    #[error("Table not found: {0}")]
    TableNotFound(String),
    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    /// Duplicate column
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
    /// Columns of one table disagree on row count
    #[error("Column {column} has {found} rows, table has {expected}")]
    RaggedColumn { column: String, expected: usize, found: usize },
    /// Inserted row does not match the table's column count
    #[error("Row has {found} values, table {table} has {expected} columns")]
    RowArity { table: String, expected: usize, found: usize },
    /// Command referenced a variable that was never assigned
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),
    /// Variable holds a different kind of result than the command needs
    #[error("Variable {name} is not a {expected}")]
    VariableKind { name: String, expected: &'static str },
    /// Schema declared in the script disagrees with the loaded fixture
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    /// Sampled parameters cannot express the requested selectivity
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;
