use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TypeError;

/// Declared type of a column.
///
/// The set is closed: every cell value is stored as a string and the type
/// only decides which strings a column accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// 32-bit signed base-10 integer.
    Integer,
    /// Floating-point number.
    Real,
    /// Exactly one character.
    Char,
    /// Any string.
    String,
    /// One of the column's available values.
    Enum,
    /// E-mail address.
    Email,
}

impl ColumnType {
    /// All column types in declaration order.
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Integer,
        ColumnType::Real,
        ColumnType::Char,
        ColumnType::String,
        ColumnType::Enum,
        ColumnType::Email,
    ];

    /// Returns the textual name used in database files.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Integer => "Integer",
            ColumnType::Real => "Real",
            ColumnType::Char => "Char",
            ColumnType::String => "String",
            ColumnType::Enum => "Enum",
            ColumnType::Email => "Email",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownType {
                name: s.to_string(),
            })
    }
}
