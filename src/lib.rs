// Columnar Query Oracle

pub mod catalog;
pub mod common;
pub mod generator;
pub mod query;

// Re-export key items for convenient access
pub use catalog::{Catalog, Column, Table};
pub use common::{Bound, Position, PositionSet, Value, ValueVector};
pub use generator::{ExperimentConfig, Generator, GeneratorConfig, GeneratorError, Manifest};
pub use query::executor::result::{OracleError, OracleResult};
pub use query::{Command, OracleEngine};
