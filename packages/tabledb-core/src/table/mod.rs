//! Table schema, rows, and cell validation.
//!
//! Rows hold no reference to columns: the value at position `i` belongs to
//! column `i`. Every operation that changes the column list rewrites all
//! rows in the same call so that each row always has exactly one value per
//! column.

mod column;
mod row;
#[allow(clippy::module_inception)]
mod table;
pub mod validation;

pub use column::Column;
pub use row::Row;
pub use table::Table;
