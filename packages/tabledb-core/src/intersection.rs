//! Relational intersection of two tables.

use std::collections::HashSet;

use crate::table::{Column, Row, Table};

/// Name given to every intersection result.
pub const INTERSECTION_TABLE_NAME: &str = "intersection";

/// Computes the intersection of `first` and `second`.
///
/// A column of `first` is shared when `second` has a column with the same
/// name and type. The result has `first`'s shared columns in `first`'s
/// order, and contains every row of `first` (projected onto the shared
/// columns) whose projection equals the projection of some row of
/// `second`. Duplicates in `first` are kept.
///
/// # Returns
/// `None` if the tables share no column. The returned table is not part
/// of any database.
pub fn intersect(first: &Table, second: &Table) -> Option<Table> {
    // (position in first, position in second) for each shared column
    let shared: Vec<(usize, usize)> = first
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(i, column)| {
            second
                .columns()
                .iter()
                .position(|other| other.matches(column))
                .map(|j| (i, j))
        })
        .collect();

    if shared.is_empty() {
        return None;
    }

    let candidates: HashSet<Vec<&str>> = second
        .rows()
        .iter()
        .map(|row| project(row, shared.iter().map(|&(_, j)| j)))
        .collect();

    let rows: Vec<Row> = first
        .rows()
        .iter()
        .map(|row| project(row, shared.iter().map(|&(i, _)| i)))
        .filter(|projected| candidates.contains(projected))
        .map(|projected| Row::new(projected.into_iter().map(String::from).collect()))
        .collect();

    let columns: Vec<Column> = shared
        .iter()
        .map(|&(i, _)| first.columns()[i].clone())
        .collect();

    tracing::debug!(
        "Intersection of '{}' and '{}': {} shared columns, {} rows",
        first.name(),
        second.name(),
        columns.len(),
        rows.len()
    );

    Some(Table::assemble(INTERSECTION_TABLE_NAME, columns, rows))
}

fn project(row: &Row, positions: impl Iterator<Item = usize>) -> Vec<&str> {
    positions
        .map(|index| row.get(index).unwrap_or_default())
        .collect()
}
