//! CSV and TSV tables

use std::io::Read;
use std::path::Path;

use crate::error::{DeckSourceError, Result};
use crate::table::Table;

/// Delimiters tried by [`detect_delimiter`], in order of preference on ties
const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// CSV parser configuration
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Delimiter character, detected from the first line when `None`
    pub delimiter: Option<char>,
    /// Whether to trim whitespace from values
    pub trim_whitespace: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim_whitespace: true,
        }
    }
}

impl CsvConfig {
    pub fn comma() -> Self {
        Self::default().with_delimiter(',')
    }

    pub fn tab() -> Self {
        Self::default().with_delimiter('\t')
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }
}

/// Reads delimited text with a header row into a [`Table`]
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    config: CsvConfig,
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Parse a CSV or TSV file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DeckSourceError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        self.parse_string(&content)
    }

    /// Parse delimited text held in memory
    pub fn parse_string(&self, data: &str) -> Result<Table> {
        if data.trim().is_empty() {
            return Err(DeckSourceError::EmptySource("CSV data is empty".to_string()));
        }
        let delimiter = self
            .config
            .delimiter
            .unwrap_or_else(|| detect_delimiter(data));
        self.parse_reader(data.as_bytes(), delimiter)
    }

    fn parse_reader<R: Read>(&self, reader: R, delimiter: char) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .has_headers(true)
            .trim(if self.config.trim_whitespace {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(true) // Allow records with varying number of fields
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        tracing::debug!(
            delimiter = ?delimiter,
            columns = headers.len(),
            rows = rows.len(),
            "parsed delimited table"
        );
        Table::from_records(headers, rows)
    }
}

/// Pick the candidate delimiter occurring most often in the first line,
/// falling back to a comma
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_delimiter = ',';
    let mut best_count = 0;
    for delim in CANDIDATE_DELIMITERS {
        let count = first_line.matches(delim).count();
        if count > best_count {
            best_count = count;
            best_delimiter = delim;
        }
    }

    best_delimiter
}
