//! Store error types.

use thiserror::Error;

use crate::types::ColumnType;

/// Store operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No database is currently open
    #[error("No active database")]
    NoActiveDatabase,

    /// Table not found
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    /// Table already exists
    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),

    /// Column index out of range
    #[error("Column {index} not found in table '{table}'")]
    ColumnNotFound { table: String, index: usize },

    /// Column already exists in table
    #[error("Column '{column}' already exists in table '{table}'")]
    ColumnAlreadyExists { table: String, column: String },

    /// Row index out of range
    #[error("Row {index} not found in table '{table}'")]
    RowNotFound { table: String, index: usize },

    /// Rows need at least one column to hold data
    #[error("Table '{table}' has no columns")]
    TableHasNoColumns { table: String },

    /// Cell value rejected by the column's type rule
    #[error("Invalid value '{value}' for column '{column}' of type {column_type}")]
    InvalidValue {
        column: String,
        column_type: ColumnType,
        value: String,
    },

    /// Database, table or column name rejected
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Enum column declared without any available values
    #[error("Enum column '{column}' needs at least one available value")]
    EmptyEnumValues { column: String },

    /// Malformed database file
    #[error("Data corruption detected: {0}")]
    DataCorruption(String),

    /// Disk full error during persistence
    #[error("Disk full: {0}")]
    DiskFull(String),

    /// I/O error during persistence
    #[error("I/O error: {0}")]
    IoError(String),

    /// Transient I/O error that may succeed on retry
    #[error("Transient I/O error: {0}")]
    TransientIoError(String),
}

/// Coarse classification of [`StoreError`] for callers that only decide
/// between re-prompting, reporting and giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Duplicate table or column name
    NameConflict,
    /// Value or name rejected by a validation rule
    Validation,
    /// Table, column or row does not exist
    NotFound,
    /// Storage could not be read, written or parsed
    Io,
    /// Operation not allowed in the current state
    Precondition,
}

impl StoreError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StoreError::TableAlreadyExists(_) | StoreError::ColumnAlreadyExists { .. } => {
                ErrorCategory::NameConflict
            }
            StoreError::InvalidValue { .. }
            | StoreError::InvalidName { .. }
            | StoreError::EmptyEnumValues { .. } => ErrorCategory::Validation,
            StoreError::TableNotFound { .. }
            | StoreError::ColumnNotFound { .. }
            | StoreError::RowNotFound { .. } => ErrorCategory::NotFound,
            StoreError::DataCorruption(_)
            | StoreError::DiskFull(_)
            | StoreError::IoError(_)
            | StoreError::TransientIoError(_) => ErrorCategory::Io,
            StoreError::NoActiveDatabase | StoreError::TableHasNoColumns { .. } => {
                ErrorCategory::Precondition
            }
        }
    }
}
