//! PDF Export Module
//!
//! Converts composed flash card pages into PDF 1.4 files.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `document`: catalog, page tree and information dictionary
//! - `content`: content stream operators
//! - `fonts`: base-14 font resources
//! - `renderer`: converts a `PageRender` to a content stream
//! - `writer`: file structure, xref table and compression
//! - `options`: PDF export configuration
//! - `api`: public entry points

mod api;
mod content;
mod document;
mod fonts;
mod objects;
mod options;
mod renderer;
mod writer;

pub use api::*;
pub use options::*;
pub use writer::{PdfDocumentWriter, PdfError, Result};
