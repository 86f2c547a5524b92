use serde::{Deserialize, Serialize};

/// A row of string cells, positionally aligned with its table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Row {
    /// Cell values in column order
    pub values: Vec<String>,
}

impl Row {
    /// Creates a row from cell values.
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Creates a row of `width` empty cells.
    pub fn empty(width: usize) -> Self {
        Self {
            values: vec![String::new(); width],
        }
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the cell at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}
