//! Store - PDF output and settings persistence
//!
//! This crate writes composed flash card pages as PDF documents and keeps
//! the settings file the command-line tool reads.

mod error;
mod settings;
pub mod pdf;

pub use error::*;
pub use settings::*;
