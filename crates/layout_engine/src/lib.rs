//! Layout Engine - Card grid, shrink-to-fit text, and duplex mapping
//!
//! This crate computes where everything on a flash card sheet goes: the fixed
//! 2x4 grid on a Letter page, the wrapped and shrunk lines of each card's text,
//! and the cell each card's back lands in once the paper is flipped.

mod duplex;
mod error;
mod grid;
mod line_breaker;
mod text_fit;

pub use duplex::*;
pub use error::*;
pub use grid::*;
pub use line_breaker::*;
pub use text_fit::*;
