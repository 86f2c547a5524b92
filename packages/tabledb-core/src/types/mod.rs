//! Column type enumeration and its textual names.

mod column_type;
mod error;

pub use column_type::ColumnType;
pub use error::TypeError;
