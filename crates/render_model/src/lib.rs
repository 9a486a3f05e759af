//! Render Model - Deck to page conversion
//!
//! This crate holds the flash card deck model and turns a deck into drawable
//! pages: positioned glyph runs and guide lines, with the transform each page
//! is drawn under.

mod compositor;
mod config;
mod deck;
mod error;
mod render_item;

pub use compositor::*;
pub use config::*;
pub use deck::*;
pub use error::*;
pub use render_item::*;
