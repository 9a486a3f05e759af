//! Render item types

use layout_engine::{CellPos, PageTransform};
use serde::{Deserialize, Serialize};
use text_engine::StandardFont;

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Components scaled to 0.0..=1.0
    pub fn to_unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// A glyph run for rendering text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    /// The text to render
    pub text: String,
    pub font: StandardFont,
    /// Font size in points
    pub font_size: f64,
    /// Text color
    pub color: Color,
    /// Position (baseline start)
    pub x: f64,
    pub y: f64,
}

/// Dash pattern for stroked lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub on: f64,
    pub off: f64,
}

impl DashPattern {
    /// Pattern used for cut guides
    pub const CUT_GUIDE: DashPattern = DashPattern { on: 3.0, off: 3.0 };
}

/// Render item types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderItem {
    /// A glyph run (text)
    GlyphRun(GlyphRun),
    /// A line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
        dash: Option<DashPattern>,
    },
}

impl RenderItem {
    pub fn as_glyph_run(&self) -> Option<&GlyphRun> {
        match self {
            RenderItem::GlyphRun(run) => Some(run),
            _ => None,
        }
    }
}

/// Which side of the paper a page prints on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSide {
    Front,
    Back,
}

/// Where a card landed on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlacement {
    /// Index of the card in the deck
    pub card_index: usize,
    pub cell: CellPos,
}

/// A rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRender {
    pub page_index: u32,
    pub sheet_index: usize,
    pub side: PageSide,
    pub width: f64,
    pub height: f64,
    /// Transform every item on the page is drawn under
    pub transform: PageTransform,
    pub items: Vec<RenderItem>,
    pub placements: Vec<CardPlacement>,
}

impl PageRender {
    pub fn glyph_runs(&self) -> impl Iterator<Item = &GlyphRun> {
        self.items.iter().filter_map(RenderItem::as_glyph_run)
    }

    /// Cell a card was drawn in on this page
    pub fn cell_of(&self, card_index: usize) -> Option<CellPos> {
        self.placements
            .iter()
            .find(|p| p.card_index == card_index)
            .map(|p| p.cell)
    }
}

/// The complete render model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub pages: Vec<PageRender>,
}

impl RenderModel {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    pub fn add_page(&mut self, page: PageRender) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
