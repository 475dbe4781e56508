//! Catalog Module
//!
//! Holds the tables visible to one oracle run, keyed by qualified name.

pub mod column;
pub mod table;

pub use self::column::Column;
pub use self::table::Table;

use std::collections::BTreeMap;

use crate::query::executor::result::{OracleError, OracleResult};

/// The set of tables a test-case family queries against
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<String, Table>,
}

impl Catalog {
    /// Create a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any previous table of the same name
    pub fn register(&mut self, table: Table) {
        self.tables.insert(table.name().to_string(), table);
    }

    /// Check if a table exists
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Get a table by qualified name
    pub fn table(&self, name: &str) -> OracleResult<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| OracleError::TableNotFound(name.to_string()))
    }

    /// Resolve a fully qualified column reference such as `db1.tbl1.col1`
    pub fn resolve_column(&self, qualified: &str) -> OracleResult<&Column> {
        let (table, column) = qualified
            .rsplit_once('.')
            .ok_or_else(|| OracleError::ColumnNotFound(qualified.to_string()))?;
        self.table(table)?.column(column)
    }
}
