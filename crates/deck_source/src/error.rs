//! Error types for deck loading

use thiserror::Error;

/// Errors that can occur while turning input files into cards
#[derive(Debug, Error)]
pub enum DeckSourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("XLSX parse error: {0}")]
    XlsxParse(String),

    /// The free-text separator pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Source holds no header and no data
    #[error("Source is empty: {0}")]
    EmptySource(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A table needs a front and a back column
    #[error("Table has {0} non-empty column(s), at least 2 are needed")]
    NotEnoughColumns(usize),
}

/// Result type for deck loading
pub type Result<T> = std::result::Result<T, DeckSourceError>;
