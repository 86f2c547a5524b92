//! Plain-text database file format.
//!
//! ```text
//! <database name>
//! <table name>
//! <col>\t<Type>\t<v1,v2>%<col>\t<Type>\t%
//! <cell>\t<cell>
//! $
//! <next table name>
//! ...
//! ```
//!
//! There is no escaping: names and values must not contain TAB, CR, LF,
//! [`TABLES_SEPARATOR`] or [`COLUMNS_SEPARATOR`], and enum values must not
//! contain [`VALUES_SEPARATOR`]. Blank lines are skipped on decode, so a
//! row of a single-column table whose only cell is empty does not survive
//! a round trip.

use std::path::PathBuf;

use crate::database::Database;
use crate::error::StoreError;
use crate::table::{Column, Row, Table};
use crate::types::ColumnType;

/// Terminates each table block.
pub const TABLES_SEPARATOR: char = '$';
/// Terminates each column record on the column-list line.
pub const COLUMNS_SEPARATOR: char = '%';
/// Separates fields of a column record and cells of a row.
pub const FIELD_SEPARATOR: char = '\t';
/// Separates enum available values.
pub const VALUES_SEPARATOR: char = ',';

/// Characters that cannot appear in any name or cell value.
pub const RESERVED_CHARACTERS: [char; 5] =
    ['\t', '\n', '\r', TABLES_SEPARATOR, COLUMNS_SEPARATOR];

/// Encodes a database to its file representation.
pub fn encode(db: &Database) -> String {
    let mut out = String::new();
    out.push_str(&db.name);
    out.push('\n');

    for table in db.tables() {
        out.push_str(table.name());
        out.push('\n');

        for column in table.columns() {
            encode_column(&mut out, column);
        }
        out.push('\n');

        for row in table.rows() {
            for (index, value) in row.values.iter().enumerate() {
                if index > 0 {
                    out.push(FIELD_SEPARATOR);
                }
                out.push_str(value);
            }
            out.push('\n');
        }

        out.push(TABLES_SEPARATOR);
        out.push('\n');
    }

    out
}

fn encode_column(out: &mut String, column: &Column) {
    out.push_str(&column.name);
    out.push(FIELD_SEPARATOR);
    out.push_str(column.column_type.as_str());
    out.push(FIELD_SEPARATOR);
    for (index, value) in column.available_values.iter().enumerate() {
        if index > 0 {
            out.push(VALUES_SEPARATOR);
        }
        out.push_str(value);
    }
    out.push(COLUMNS_SEPARATOR);
}

/// Decodes a database from its file representation.
///
/// # Arguments
/// * `text` - File contents
/// * `path` - Location recorded on the decoded database
///
/// # Returns
/// `Result<Database, StoreError>` containing the database, or
/// `StoreError::DataCorruption` if the structure is malformed.
pub fn decode(text: &str, path: impl Into<PathBuf>) -> Result<Database, StoreError> {
    let (name_line, body) = text.split_once('\n').unwrap_or((text, ""));
    let name = name_line.strip_suffix('\r').unwrap_or(name_line);
    if name.is_empty() {
        return Err(StoreError::DataCorruption(
            "Missing database name".to_string(),
        ));
    }

    let mut db = Database::new(name, path);

    for block in body.split(TABLES_SEPARATOR) {
        let normalized = block.replace("\r\n", "\n");
        let lines: Vec<&str> = normalized.split('\n').filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            continue;
        }

        let table = decode_table(&lines)?;
        db.add_table(table).map_err(|e| match e {
            StoreError::TableAlreadyExists(table) => {
                StoreError::DataCorruption(format!("Duplicate table name '{}'", table))
            }
            other => other,
        })?;
    }

    Ok(db)
}

fn decode_table(lines: &[&str]) -> Result<Table, StoreError> {
    let name = lines[0];

    let columns = match lines.get(1) {
        Some(line) => decode_columns(name, line)?,
        None => Vec::new(),
    };

    let rows = lines
        .iter()
        .skip(2)
        .map(|line| Row::new(line.split(FIELD_SEPARATOR).map(String::from).collect()))
        .collect();

    Table::from_parts(name, columns, rows)
}

fn decode_columns(table: &str, line: &str) -> Result<Vec<Column>, StoreError> {
    if !line.ends_with(COLUMNS_SEPARATOR) {
        return Err(StoreError::DataCorruption(format!(
            "Column list of table '{}' is not terminated",
            table
        )));
    }

    line.split(COLUMNS_SEPARATOR)
        .filter(|record| !record.is_empty())
        .map(|record| decode_column(table, record))
        .collect()
}

fn decode_column(table: &str, record: &str) -> Result<Column, StoreError> {
    let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    if fields.len() < 2 || fields.len() > 3 || fields[0].is_empty() {
        return Err(StoreError::DataCorruption(format!(
            "Malformed column record '{}' in table '{}'",
            record, table
        )));
    }

    let column_type: ColumnType = fields[1]
        .parse()
        .map_err(|e| StoreError::DataCorruption(format!("{} in table '{}'", e, table)))?;

    let available_values = fields
        .get(2)
        .map(|values| {
            values
                .split(VALUES_SEPARATOR)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(Column::new(fields[0], column_type, available_values))
}
