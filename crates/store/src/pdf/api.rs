//! PDF Export Public API
//!
//! Entry points that take a deck (or already composed pages) to a finished
//! PDF in a writer, a byte buffer, or a file.

use super::options::PdfExportOptions;
use super::writer::{PdfDocumentWriter, PdfError, Result};
use render_model::{compose_deck, Deck, PageRender, RenderConfig};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Lay out a deck and write the flash card PDF to `writer`
///
/// # Example
///
/// ```ignore
/// use render_model::{Card, Deck, RenderConfig};
/// use store::pdf::{write_flashcards_pdf, PdfExportOptions};
///
/// let deck = Deck::new(vec![Card::new("cat", "a small domestic feline")]);
/// let mut out = Vec::new();
/// write_flashcards_pdf(&deck, &RenderConfig::default(), &PdfExportOptions::default(), &mut out)?;
/// ```
pub fn write_flashcards_pdf<W: Write>(
    deck: &Deck,
    config: &RenderConfig,
    options: &PdfExportOptions,
    writer: W,
) -> Result<()> {
    let model = compose_deck(deck, config)?;
    tracing::info!(
        cards = deck.len(),
        sheets = deck.sheet_count(),
        pages = model.page_count(),
        duplex = %config.duplex_mode,
        "rendering flash cards"
    );
    PdfDocumentWriter::new(options.clone()).write(&model.pages, writer)
}

/// Lay out a deck and return the PDF bytes
pub fn flashcards_pdf_bytes(
    deck: &Deck,
    config: &RenderConfig,
    options: &PdfExportOptions,
) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_flashcards_pdf(deck, config, options, &mut buffer)?;
    Ok(buffer)
}

/// Lay out a deck and write the PDF to a file
///
/// The document is fully rendered before `path` is touched, so a deck or
/// config error leaves an existing file unchanged.
pub fn export_flashcards_pdf(
    deck: &Deck,
    config: &RenderConfig,
    options: &PdfExportOptions,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = flashcards_pdf_bytes(deck, config, options)?;
    fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "PDF written");
    Ok(())
}

/// Export composed pages to PDF bytes in memory
pub fn export_pdf_bytes(pages: &[PageRender], options: PdfExportOptions) -> Result<Vec<u8>> {
    validate_pages(pages)?;
    PdfDocumentWriter::new(options).write_to_bytes(pages)
}

/// Check that every page has a usable size.
///
/// An empty slice is valid and yields a document with no pages.
pub fn validate_pages(pages: &[PageRender]) -> Result<()> {
    for (i, page) in pages.iter().enumerate() {
        if !(page.width > 0.0 && page.width.is_finite()) {
            return Err(PdfError::InvalidDocument(format!(
                "Page {} has invalid width: {}",
                i, page.width
            )));
        }
        if !(page.height > 0.0 && page.height.is_finite()) {
            return Err(PdfError::InvalidDocument(format!(
                "Page {} has invalid height: {}",
                i, page.height
            )));
        }
    }
    Ok(())
}
