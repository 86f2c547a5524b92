//! Database container holding an ordered list of tables.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::StoreError;
use crate::table::Table;

/// Named collection of tables bound to a storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Database {
    /// Database name (first line of the file)
    pub name: String,
    /// Location of the backing file
    pub path: PathBuf,
    /// Tables in creation order
    tables: Vec<Table>,
}

impl Database {
    /// Creates a new empty database.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            tables: Vec::new(),
        }
    }

    /// Returns all tables in order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Returns all table names in order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name().to_string()).collect()
    }

    /// Returns the number of tables in the database.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if a table named `name` exists (case-sensitive).
    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t.name() == name)
    }

    /// Gets a reference to a table by name.
    pub fn table(&self, name: &str) -> Result<&Table, StoreError> {
        self.tables
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| StoreError::TableNotFound {
                table: name.to_string(),
            })
    }

    /// Gets a mutable reference to a table by name.
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
        self.tables
            .iter_mut()
            .find(|t| t.name() == name)
            .ok_or_else(|| StoreError::TableNotFound {
                table: name.to_string(),
            })
    }

    /// Creates a new empty table with the given name.
    ///
    /// # Returns
    /// `Err(StoreError::TableAlreadyExists)` if the name is taken.
    pub fn create_table(&mut self, name: &str) -> Result<(), StoreError> {
        self.add_table(Table::new(name))
    }

    /// Appends an already-built table.
    pub fn add_table(&mut self, table: Table) -> Result<(), StoreError> {
        if self.contains_table(table.name()) {
            return Err(StoreError::TableAlreadyExists(table.name().to_string()));
        }
        self.tables.push(table);
        Ok(())
    }

    /// Deletes a table by name.
    ///
    /// # Returns
    /// `Result<Table, StoreError>` containing the removed table.
    pub fn delete_table(&mut self, name: &str) -> Result<Table, StoreError> {
        let index = self
            .tables
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| StoreError::TableNotFound {
                table: name.to_string(),
            })?;
        Ok(self.tables.remove(index))
    }
}
