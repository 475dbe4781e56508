// Column Module
//
// A named, ordered sequence of numeric values indexed by row position.

use serde::{Deserialize, Serialize};

use crate::common::{Position, Value};

/// Represents a column of a loaded table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (unqualified, e.g. `col1`)
    name: String,
    /// Values by row position
    values: Vec<Value>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Create an integer column
    pub fn from_ints(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Column::new(name, values.into_iter().map(Value::Int).collect())
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a row position
    pub fn get(&self, pos: Position) -> Option<&Value> {
        self.values.get(pos)
    }

    /// All values in row order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Copy of this column with `value` appended as the next row
    pub(crate) fn appended(&self, value: Value) -> Column {
        let mut values = Vec::with_capacity(self.values.len() + 1);
        values.extend_from_slice(&self.values);
        values.push(value);
        Column {
            name: self.name.clone(),
            values,
        }
    }
}
