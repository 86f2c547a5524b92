//! Store owning the active database.
//!
//! The store is the only entry point for mutations. It holds at most one
//! database, delegates file I/O to [`PersistenceManager`] and value checks
//! to [`crate::table::validation`]. It is not synchronized: embedders that
//! call it from several threads must wrap the whole store in a lock.

use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::database::Database;
use crate::error::StoreError;
use crate::intersection;
use crate::persistence::PersistenceManager;
use crate::table::{validation, Column, Row, Table};
use crate::types::ColumnType;

/// Owner of the active database and entry point for all operations.
#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    persistence: PersistenceManager,
    /// Absent until `create` or `open` succeeds
    database: Option<Database>,
}

impl Store {
    /// Creates a store with no active database.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            persistence: PersistenceManager::new(&config),
            config,
            database: None,
        }
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the active database, if any.
    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    /// Returns true if a database is active.
    pub fn is_open(&self) -> bool {
        self.database.is_some()
    }

    fn active(&self) -> Result<&Database, StoreError> {
        self.database.as_ref().ok_or(StoreError::NoActiveDatabase)
    }

    fn active_mut(&mut self) -> Result<&mut Database, StoreError> {
        self.database.as_mut().ok_or(StoreError::NoActiveDatabase)
    }

    fn table_mut(&mut self, table: &str) -> Result<&mut Table, StoreError> {
        self.active_mut()?.table_mut(table)
    }

    // Database lifecycle

    /// Opens the database file at `path` and makes it active.
    ///
    /// The previous database stays active if loading fails.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let db = self.persistence.load(path).inspect_err(|e| {
            tracing::warn!("Failed to open database at {}: {}", path.display(), e);
        })?;

        tracing::info!(
            "Opened database '{}' with {} tables from {}",
            db.name,
            db.table_count(),
            path.display()
        );
        self.database = Some(db);
        Ok(())
    }

    /// Creates a new empty database and makes it active.
    ///
    /// Nothing is written until [`Store::save`] is called.
    pub fn create(&mut self, name: &str, path: impl Into<PathBuf>) -> Result<(), StoreError> {
        validation::validate_name(name, self.config.reject_reserved_characters)?;

        let db = Database::new(name, path);
        tracing::info!("Created database '{}' at {}", db.name, db.path.display());
        self.database = Some(db);
        Ok(())
    }

    /// Writes the active database to its recorded path.
    pub fn save(&self) -> Result<(), StoreError> {
        let db = self.active()?;
        self.persistence.save(db).inspect_err(|e| {
            tracing::error!("Failed to save database '{}': {}", db.name, e);
        })?;

        tracing::info!("Saved database '{}' to {}", db.name, db.path.display());
        Ok(())
    }

    /// Removes the active database's file and discards the database.
    ///
    /// The database stays active if the file cannot be removed.
    pub fn delete(&mut self) -> Result<(), StoreError> {
        let db = self.active()?;
        self.persistence.remove(&db.path)?;

        if let Some(db) = self.database.take() {
            tracing::info!("Deleted database '{}'", db.name);
        }
        Ok(())
    }

    // Lookups

    /// Returns the names of all tables in the active database.
    pub fn table_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.active()?.table_names())
    }

    /// Gets a table of the active database by name.
    pub fn table(&self, name: &str) -> Result<&Table, StoreError> {
        self.active()?.table(name)
    }

    // Tables

    /// Creates an empty table.
    ///
    /// # Returns
    /// `Err(StoreError::TableAlreadyExists)` if the name is taken.
    pub fn create_table(&mut self, name: &str) -> Result<(), StoreError> {
        validation::validate_name(name, self.config.reject_reserved_characters)?;

        self.active_mut()?.create_table(name).inspect_err(|e| {
            tracing::warn!("Table creation rejected: {}", e);
        })?;
        tracing::debug!("Created table '{}'", name);
        Ok(())
    }

    /// Deletes a table and returns it.
    pub fn delete_table(&mut self, name: &str) -> Result<Table, StoreError> {
        let table = self.active_mut()?.delete_table(name)?;
        tracing::debug!("Deleted table '{}'", name);
        Ok(table)
    }

    // Columns

    /// Appends a column to `table`; every existing row gets an empty value
    /// for it.
    ///
    /// Available values are kept only for enum columns, which must have at
    /// least one.
    ///
    /// # Arguments
    /// * `table` - Table name
    /// * `name` - New column name
    /// * `column_type` - Declared type
    /// * `available_values` - Accepted values for enum columns
    pub fn create_column(
        &mut self,
        table: &str,
        name: &str,
        column_type: ColumnType,
        available_values: Vec<String>,
    ) -> Result<(), StoreError> {
        let reject_reserved = self.config.reject_reserved_characters;
        validation::validate_name(name, reject_reserved)?;
        validation::validate_available_values(
            name,
            column_type,
            &available_values,
            reject_reserved,
        )?;

        let available_values = match column_type {
            ColumnType::Enum => available_values,
            _ => Vec::new(),
        };

        self.table_mut(table)?
            .add_column(Column::new(name, column_type, available_values))
            .inspect_err(|e| {
                tracing::warn!("Column creation rejected: {}", e);
            })?;
        tracing::debug!("Created {} column '{}' in table '{}'", column_type, name, table);
        Ok(())
    }

    /// Deletes the column at `index` and its value from every row. Deleting
    /// the last column removes all rows.
    pub fn delete_column(&mut self, table: &str, index: usize) -> Result<Column, StoreError> {
        let column = self.table_mut(table)?.remove_column(index)?;
        tracing::debug!("Deleted column '{}' from table '{}'", column.name, table);
        Ok(column)
    }

    // Rows

    /// Appends a row of empty values and returns its index.
    pub fn create_row(&mut self, table: &str) -> Result<usize, StoreError> {
        let index = self.table_mut(table)?.push_row()?;
        tracing::debug!("Created row {} in table '{}'", index, table);
        Ok(index)
    }

    /// Deletes the row at `index` and returns it.
    pub fn delete_row(&mut self, table: &str, index: usize) -> Result<Row, StoreError> {
        let row = self.table_mut(table)?.remove_row(index)?;
        tracing::debug!("Deleted row {} from table '{}'", index, table);
        Ok(row)
    }

    // Cells

    /// Validates `value` against the column's type and stores it.
    ///
    /// The cell keeps its previous value on failure; no undo history is
    /// kept.
    ///
    /// # Arguments
    /// * `table` - Table name
    /// * `column` - Column index
    /// * `row` - Row index
    /// * `value` - New cell value
    pub fn edit_cell(
        &mut self,
        table: &str,
        column: usize,
        row: usize,
        value: &str,
    ) -> Result<(), StoreError> {
        let reject_reserved = self.config.reject_reserved_characters;
        let target = self.table_mut(table)?;

        if reject_reserved && validation::contains_reserved(value) {
            let definition = target.column(column).ok_or_else(|| StoreError::ColumnNotFound {
                table: table.to_string(),
                index: column,
            })?;
            return Err(StoreError::InvalidValue {
                column: definition.name.clone(),
                column_type: definition.column_type,
                value: value.to_string(),
            });
        }

        target.set_cell(column, row, value).inspect_err(|e| {
            tracing::warn!("Cell edit rejected: {}", e);
        })
    }

    // Queries

    /// Intersects two tables of the active database.
    ///
    /// # Returns
    /// `Ok(None)` if the tables share no column of the same name and type.
    /// The result table is not added to the database.
    pub fn intersect(&self, first: &str, second: &str) -> Result<Option<Table>, StoreError> {
        let db = self.active()?;
        Ok(intersection::intersect(db.table(first)?, db.table(second)?))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
