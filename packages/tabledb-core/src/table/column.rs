//! Column definition within a table.

use serde::{Deserialize, Serialize};

use super::validation;
use crate::types::ColumnType;

/// Column definition within a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Declared type
    pub column_type: ColumnType,
    /// Accepted values (only meaningful for `ColumnType::Enum`)
    pub available_values: Vec<String>,
}

impl Column {
    /// Creates a new column.
    ///
    /// # Arguments
    /// * `name` - Column name
    /// * `column_type` - Declared type
    /// * `available_values` - Accepted values for enum columns
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        available_values: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            available_values,
        }
    }

    /// Returns true if `value` is legal for this column's type.
    pub fn is_valid(&self, value: &str) -> bool {
        validation::is_valid(self, value)
    }

    /// Returns true if `other` has the same name and type.
    pub fn matches(&self, other: &Column) -> bool {
        self.name == other.name && self.column_type == other.column_type
    }
}
