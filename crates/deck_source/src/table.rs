//! Normalized two-dimensional tables of text cells

use crate::error::{DeckSourceError, Result};
use render_model::Card;
use std::collections::HashSet;

/// Header row plus data rows, every row as wide as the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from raw header and data rows.
    ///
    /// Rows are padded to a common width, blank headers are named
    /// `Column{n}`, and rows or columns without any non-blank data cell are
    /// dropped.
    pub fn from_records(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);

        let mut columns: Vec<String> = (0..width)
            .map(|i| match headers.get(i).map(|h| h.trim()) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("Column{}", i + 1),
            })
            .collect();

        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        let keep: Vec<bool> = (0..width)
            .map(|col| rows.iter().any(|row| !row[col].trim().is_empty()))
            .collect();
        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            tracing::debug!(dropped, "dropping empty columns");
            columns = retain_columns(columns, &keep);
            rows = rows.into_iter().map(|row| retain_columns(row, &keep)).collect();
        }

        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(DeckSourceError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self { columns, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text, empty when out of range
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Cards from two columns, by name, defaulting to the first two columns
    pub fn to_cards(&self, front_column: Option<&str>, back_column: Option<&str>) -> Result<Vec<Card>> {
        let front = self.resolve_column(front_column, 0)?;
        let back = self.resolve_column(back_column, 1)?;

        Ok((0..self.row_count())
            .map(|row| Card::new(self.cell(row, front).trim(), self.cell(row, back).trim()))
            .collect())
    }

    fn resolve_column(&self, name: Option<&str>, default: usize) -> Result<usize> {
        match name {
            Some(name) => self
                .column_index(name)
                .ok_or_else(|| DeckSourceError::ColumnNotFound(name.to_string())),
            None if default < self.column_count() => Ok(default),
            None => Err(DeckSourceError::NotEnoughColumns(self.column_count())),
        }
    }
}

fn retain_columns(values: Vec<String>, keep: &[bool]) -> Vec<String> {
    values
        .into_iter()
        .zip(keep)
        .filter_map(|(value, keep)| keep.then_some(value))
        .collect()
}
