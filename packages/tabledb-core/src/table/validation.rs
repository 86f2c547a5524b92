//! Cell value and name validation.
//!
//! Cell values are checked against the declared type of their column. Names
//! and values that reach the file codec are additionally checked against the
//! codec's reserved characters.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use super::column::Column;
use crate::error::StoreError;
use crate::persistence::codec::{RESERVED_CHARACTERS, VALUES_SEPARATOR};
use crate::types::ColumnType;

/// Local part, `@`, one or more dot-terminated domain labels, then a TLD.
const EMAIL_PATTERN: &str = r"^[\w.+\-]+@([\w.\-]+\.)+\w+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        RegexBuilder::new(EMAIL_PATTERN)
            .case_insensitive(true)
            .build()
            .expect("email pattern compiles")
    })
}

/// Returns true if `value` is legal for `column`'s declared type.
///
/// | type      | rule                                          |
/// |-----------|-----------------------------------------------|
/// | `Integer` | parses as a 32-bit signed base-10 integer     |
/// | `Real`    | parses as a floating-point number             |
/// | `Char`    | exactly one character                         |
/// | `String`  | always valid                                  |
/// | `Enum`    | equals one of the column's available values   |
/// | `Email`   | non-empty, `local@domain(.domain)+.tld`       |
pub fn is_valid(column: &Column, value: &str) -> bool {
    match column.column_type {
        ColumnType::Integer => value.parse::<i32>().is_ok(),
        ColumnType::Real => value.parse::<f64>().is_ok(),
        ColumnType::Char => {
            let mut chars = value.chars();
            chars.next().is_some() && chars.next().is_none()
        }
        ColumnType::String => true,
        ColumnType::Enum => column.available_values.iter().any(|v| v == value),
        ColumnType::Email => !value.is_empty() && email_regex().is_match(value),
    }
}

/// Returns true if `text` contains a character the file codec uses as a
/// delimiter.
pub fn contains_reserved(text: &str) -> bool {
    text.contains(&RESERVED_CHARACTERS[..])
}

/// Validates a database, table or column name.
///
/// # Arguments
/// * `name` - Name to check
/// * `reject_reserved` - Also reject codec delimiters
///
/// # Returns
/// `Result<(), StoreError>` indicating success or validation failure.
pub fn validate_name(name: &str, reject_reserved: bool) -> Result<(), StoreError> {
    if name.is_empty() {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: "name must not be empty",
        });
    }
    if reject_reserved && contains_reserved(name) {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: "name contains a reserved character",
        });
    }
    Ok(())
}

/// Validates the available values of a column about to be created.
///
/// Enum columns need at least one value. Each value must be non-empty and
/// free of the list separator, otherwise it would not survive a save/open
/// cycle.
pub fn validate_available_values(
    column_name: &str,
    column_type: ColumnType,
    values: &[String],
    reject_reserved: bool,
) -> Result<(), StoreError> {
    if column_type != ColumnType::Enum {
        return Ok(());
    }
    if values.is_empty() {
        return Err(StoreError::EmptyEnumValues {
            column: column_name.to_string(),
        });
    }
    for value in values {
        let malformed = value.is_empty() || value.contains(VALUES_SEPARATOR);
        if malformed || (reject_reserved && contains_reserved(value)) {
            return Err(StoreError::InvalidValue {
                column: column_name.to_string(),
                column_type,
                value: value.clone(),
            });
        }
    }
    Ok(())
}
