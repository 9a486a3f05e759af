//! XLSX tables, read from the first worksheet

use std::io::{Read, Seek};
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

use crate::error::{DeckSourceError, Result};
use crate::table::Table;

/// Reads the first sheet of a workbook into a [`Table`]
#[derive(Debug, Clone, Default)]
pub struct XlsxParser;

impl XlsxParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse an XLSX file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DeckSourceError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            DeckSourceError::XlsxParse(format!("Failed to open workbook: {}", e))
        })?;
        self.parse_workbook(&mut workbook)
    }

    /// Parse XLSX bytes held in memory
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Table> {
        let cursor = std::io::Cursor::new(data);
        let mut workbook: Xlsx<_> = Xlsx::new(cursor).map_err(|e| {
            DeckSourceError::XlsxParse(format!("Failed to read workbook from bytes: {}", e))
        })?;
        self.parse_workbook(&mut workbook)
    }

    fn parse_workbook<RS: Read + Seek>(&self, workbook: &mut Xlsx<RS>) -> Result<Table> {
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DeckSourceError::EmptySource("Workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            DeckSourceError::XlsxParse(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

        tracing::debug!(sheet = %sheet_name, "reading worksheet");
        table_from_range(&range)
    }
}

/// Convert a cell range, whose first row is the header, into a table
pub fn table_from_range(range: &Range<Data>) -> Result<Table> {
    if range.is_empty() {
        return Err(DeckSourceError::EmptySource("Excel sheet is empty".to_string()));
    }

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let headers = rows.next().unwrap_or_default();
    Table::from_records(headers, rows.collect())
}

/// Display text of a cell, trimmed, with whole floats shown as integers
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}
