//! Deck Sources
//!
//! Turns user input into the ordered (front, back) pairs the compositor
//! prints.
//!
//! # Features
//!
//! - Free-text parsing of `term - definition` lines with continuations
//! - CSV/TSV parsing with delimiter detection
//! - XLSX parsing of the first worksheet
//! - Validation of empty sides and sheet counts
//!
//! # Example
//!
//! ```rust
//! use deck_source::{parse_free_text, CsvParser};
//!
//! let parsed = parse_free_text("cat - a small domestic feline").unwrap();
//! assert_eq!(parsed.cards[0].front, "cat");
//!
//! let table = CsvParser::new().parse_string("Term,Definition\ndog,a canine").unwrap();
//! let cards = table.to_cards(None, None).unwrap();
//! assert_eq!(cards[0].back, "a canine");
//! ```

mod csv_parser;
mod error;
mod table;
mod text_parser;
mod validation;
mod xlsx_parser;

pub use csv_parser::{detect_delimiter, CsvConfig, CsvParser};
pub use error::{DeckSourceError, Result};
pub use table::Table;
pub use text_parser::{parse_free_text, parse_pairs, ParsedText};
pub use validation::{empty_side_warnings, live_counts, validate_cards};
pub use xlsx_parser::{table_from_range, XlsxParser};

use render_model::Deck;
use std::path::Path;

/// Input formats recognized by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `term - definition` lines
    Text,
    Csv,
    Tsv,
    Xlsx,
}

impl SourceFormat {
    /// Format for a path's extension, ignoring case
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" | "text" => Some(SourceFormat::Text),
            "csv" => Some(SourceFormat::Csv),
            "tsv" => Some(SourceFormat::Tsv),
            "xlsx" => Some(SourceFormat::Xlsx),
            _ => None,
        }
    }
}

/// A deck read from a file, with any parser warnings
#[derive(Debug, Clone, Default)]
pub struct LoadedDeck {
    pub deck: Deck,
    pub warnings: Vec<String>,
}

/// Load a deck from a file, choosing the parser by extension.
///
/// Column names only apply to tables; `None` selects the first and second
/// columns.
pub fn load_deck(
    path: impl AsRef<Path>,
    front_column: Option<&str>,
    back_column: Option<&str>,
) -> Result<LoadedDeck> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| DeckSourceError::UnsupportedFormat(path.display().to_string()))?;
    if !path.exists() {
        return Err(DeckSourceError::FileNotFound(path.display().to_string()));
    }

    let loaded = match format {
        SourceFormat::Text => {
            let parsed = parse_free_text(&std::fs::read_to_string(path)?)?;
            LoadedDeck {
                deck: Deck::new(parsed.cards),
                warnings: parsed.warnings,
            }
        }
        SourceFormat::Csv | SourceFormat::Tsv | SourceFormat::Xlsx => {
            let table = match format {
                SourceFormat::Tsv => CsvParser::with_config(CsvConfig::tab()).parse_file(path)?,
                SourceFormat::Xlsx => XlsxParser::new().parse_file(path)?,
                _ => CsvParser::new().parse_file(path)?,
            };
            LoadedDeck {
                deck: Deck::new(table.to_cards(front_column, back_column)?),
                warnings: Vec::new(),
            }
        }
    };

    tracing::debug!(
        path = %path.display(),
        format = ?format,
        cards = loaded.deck.len(),
        "loaded deck"
    );
    Ok(loaded)
}
