//! Text Engine - Standard font metrics and text encoding
//!
//! Card text is set in the PDF base-14 fonts, so no font files are loaded.
//! This crate provides the glyph advance widths those fonts are measured with
//! and the WinAnsi encoding used to write strings into content streams.
//!
//! # Modules
//!
//! - `font`: The standard fonts used on cards
//! - `metrics`: Advance widths and the `TextMeasure` trait
//! - `encoding`: Unicode to WinAnsiEncoding conversion

mod encoding;
mod font;
mod metrics;

pub use encoding::*;
pub use font::*;
pub use metrics::*;
