//! Table schema and row storage.
//!
//! Each table has:
//! - Ordered column definitions with unique names
//! - Ordered rows, each holding one value per column
//!
//! Columns and rows are only reachable mutably through the methods below,
//! which keep the row width equal to the column count.

use std::collections::HashSet;

use serde::Serialize;

use super::column::Column;
use super::row::Row;
use crate::error::StoreError;

/// Table schema and rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Table name, unique within its database
    name: String,
    /// Column definitions in declaration order
    columns: Vec<Column>,
    /// Rows in insertion order
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with no columns and no rows.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a table from already-built columns and rows.
    ///
    /// Used when loading from storage, so structural problems are reported
    /// as data corruption.
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `columns` - Column definitions
    /// * `rows` - Rows, each with `columns.len()` values
    ///
    /// # Returns
    /// `Result<Table, StoreError>` containing the table or an error.
    pub fn from_parts(
        name: impl Into<String>,
        columns: Vec<Column>,
        rows: Vec<Row>,
    ) -> Result<Self, StoreError> {
        let name = name.into();

        let mut seen_names = HashSet::new();
        for column in &columns {
            if !seen_names.insert(column.name.as_str()) {
                return Err(StoreError::DataCorruption(format!(
                    "Duplicate column name '{}' in table '{}'",
                    column.name, name
                )));
            }
        }

        if columns.is_empty() && !rows.is_empty() {
            return Err(StoreError::DataCorruption(format!(
                "Table '{}' has rows but no columns",
                name
            )));
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(StoreError::DataCorruption(format!(
                    "Row {} of table '{}' has {} values, expected {}",
                    index,
                    name,
                    row.len(),
                    columns.len()
                )));
            }
        }

        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    /// Assembles a table whose shape the caller already guarantees.
    pub(crate) fn assemble(name: impl Into<String>, columns: Vec<Column>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Returns the column definitions in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the column at `index`.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Returns the position of the column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the cell at (`column`, `row`).
    pub fn cell(&self, column: usize, row: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Appends a column and gives every existing row an empty value for it.
    ///
    /// # Returns
    /// `Err(StoreError::ColumnAlreadyExists)` if the name is taken; the
    /// table is unchanged in that case.
    pub fn add_column(&mut self, column: Column) -> Result<(), StoreError> {
        if self.column_index(&column.name).is_some() {
            return Err(StoreError::ColumnAlreadyExists {
                table: self.name.clone(),
                column: column.name,
            });
        }

        self.columns.push(column);
        for row in &mut self.rows {
            row.values.push(String::new());
        }
        Ok(())
    }

    /// Removes the column at `index` and its value from every row.
    ///
    /// Removing the last column also removes all rows.
    ///
    /// # Returns
    /// `Result<Column, StoreError>` containing the removed column.
    pub fn remove_column(&mut self, index: usize) -> Result<Column, StoreError> {
        if index >= self.columns.len() {
            return Err(StoreError::ColumnNotFound {
                table: self.name.clone(),
                index,
            });
        }

        let column = self.columns.remove(index);
        for row in &mut self.rows {
            row.values.remove(index);
        }

        if self.columns.is_empty() {
            self.rows.clear();
        }
        Ok(column)
    }

    /// Appends a row of empty values, one per column.
    ///
    /// # Returns
    /// `Result<usize, StoreError>` containing the new row's index.
    pub fn push_row(&mut self) -> Result<usize, StoreError> {
        if self.columns.is_empty() {
            return Err(StoreError::TableHasNoColumns {
                table: self.name.clone(),
            });
        }

        self.rows.push(Row::empty(self.columns.len()));
        Ok(self.rows.len() - 1)
    }

    /// Removes the row at `index`.
    pub fn remove_row(&mut self, index: usize) -> Result<Row, StoreError> {
        if index >= self.rows.len() {
            return Err(StoreError::RowNotFound {
                table: self.name.clone(),
                index,
            });
        }
        Ok(self.rows.remove(index))
    }

    /// Overwrites one cell after validating the value against its column.
    ///
    /// On failure the cell keeps its previous value.
    ///
    /// # Arguments
    /// * `column` - Column index
    /// * `row` - Row index
    /// * `value` - New cell value
    pub fn set_cell(&mut self, column: usize, row: usize, value: &str) -> Result<(), StoreError> {
        let definition = self
            .columns
            .get(column)
            .ok_or_else(|| StoreError::ColumnNotFound {
                table: self.name.clone(),
                index: column,
            })?;

        if !definition.is_valid(value) {
            return Err(StoreError::InvalidValue {
                column: definition.name.clone(),
                column_type: definition.column_type,
                value: value.to_string(),
            });
        }

        let target = self
            .rows
            .get_mut(row)
            .ok_or_else(|| StoreError::RowNotFound {
                table: self.name.clone(),
                index: row,
            })?;
        target.values[column] = value.to_string();
        Ok(())
    }
}
