//! Table Module
//!
//! A table is a fixed set of named, equal-length columns. Row positions are
//! implicit. Tables are values: inserting a row yields a new `Table` and
//! leaves the original untouched, so later test cases can still see the
//! pre-insert state.

use std::collections::HashMap;

use super::column::Column;
use crate::common::Value;
use crate::query::executor::result::{OracleError, OracleResult};

/// Represents a loaded table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Qualified table name (e.g. `db1.tbl1`)
    name: String,
    /// Columns in declaration order
    columns: Vec<Column>,
    /// Column name to index lookup
    column_map: HashMap<String, usize>,
    /// Shared row count of every column
    row_count: usize,
}

impl Table {
    /// Create a table, checking unique column names and equal column lengths
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> OracleResult<Self> {
        let name = name.into();
        let mut column_map = HashMap::new();
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        for (i, col) in columns.iter().enumerate() {
            if column_map.insert(col.name().to_string(), i).is_some() {
                return Err(OracleError::DuplicateColumn(col.name().to_string()));
            }
            if col.len() != row_count {
                return Err(OracleError::RaggedColumn {
                    column: col.name().to_string(),
                    expected: row_count,
                    found: col.len(),
                });
            }
        }

        Ok(Table {
            name,
            columns,
            column_map,
            row_count,
        })
    }

    /// Get the qualified table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows shared by all columns
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.column_map.get(name).map(|&idx| &self.columns[idx])
    }

    /// Get a column by name, failing if it does not exist
    pub fn column(&self, name: &str) -> OracleResult<&Column> {
        self.get_column(name)
            .ok_or_else(|| OracleError::ColumnNotFound(format!("{}.{}", self.name, name)))
    }

    /// A new table with one row appended across every column.
    /// Either all columns grow or the insert fails with no new table.
    pub fn with_row(&self, row: &[Value]) -> OracleResult<Table> {
        if row.len() != self.columns.len() {
            return Err(OracleError::RowArity {
                table: self.name.clone(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }

        let columns = self
            .columns
            .iter()
            .zip(row.iter())
            .map(|(col, v)| col.appended(*v))
            .collect();

        Ok(Table {
            name: self.name.clone(),
            columns,
            column_map: self.column_map.clone(),
            row_count: self.row_count + 1,
        })
    }
}
