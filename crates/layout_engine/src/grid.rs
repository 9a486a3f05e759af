//! Card grid geometry
//!
//! All coordinates are PDF user space: points, origin at the bottom-left corner
//! of the page, y growing upwards.

use crate::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// Number of card columns on a sheet
pub const COLS: usize = 2;
/// Number of card rows on a sheet
pub const ROWS: usize = 4;
/// Cards held by one sheet
pub const CARDS_PER_SHEET: usize = COLS * ROWS;

/// US Letter width in points
pub const LETTER_WIDTH: f64 = 612.0;
/// US Letter height in points
pub const LETTER_HEIGHT: f64 = 792.0;
/// Page margin around the grid (0.5 in)
pub const DEFAULT_MARGIN: f64 = 36.0;

/// Horizontal inset of the text box inside a cell
pub const TEXT_INSET_X: f64 = 10.0;
/// Vertical inset of the text box inside a cell
pub const TEXT_INSET_Y: f64 = 12.0;

/// Length of a corner registration tick
pub const CORNER_MARK_LENGTH: f64 = 12.0;
/// Distance of a corner registration tick from the printable area
pub const CORNER_MARK_OFFSET: f64 = 6.0;

/// Convert millimeters to points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

/// An axis-aligned rectangle anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.top()
    }

    /// Shrink the rectangle by `dx` on the left and right and `dy` on the top and bottom
    pub fn inset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - 2.0 * dx,
            height: self.height - 2.0 * dy,
        }
    }
}

/// A straight line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }
}

/// A cell of the card grid, 0-indexed, row 0 at the top of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cell of the k-th card of a sheet in row-major order
    pub fn from_index(index: usize) -> Self {
        Self {
            row: index / COLS,
            col: index % COLS,
        }
    }

    /// Row-major index of this cell within a sheet
    pub fn index(&self) -> usize {
        self.row * COLS + self.col
    }
}

/// Fixed 2x4 partition of a page's printable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    page_width: f64,
    page_height: f64,
    margin: f64,
    card_width: f64,
    card_height: f64,
}

impl GridGeometry {
    /// Derive the grid for a page and margin
    pub fn new(page_width: f64, page_height: f64, margin: f64) -> Result<Self> {
        let dims = [page_width, page_height, margin];
        if dims.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::InvalidPageSetup(
                "page dimensions and margin must be finite".to_string(),
            ));
        }
        if margin < 0.0 || 2.0 * margin >= page_width || 2.0 * margin >= page_height {
            return Err(LayoutError::InvalidPageSetup(format!(
                "margin {} leaves no printable area on a {}x{} page",
                margin, page_width, page_height
            )));
        }

        Ok(Self::derive(page_width, page_height, margin))
    }

    /// Letter page with a half-inch margin
    pub fn letter() -> Self {
        Self::derive(LETTER_WIDTH, LETTER_HEIGHT, DEFAULT_MARGIN)
    }

    fn derive(page_width: f64, page_height: f64, margin: f64) -> Self {
        Self {
            page_width,
            page_height,
            margin,
            card_width: (page_width - 2.0 * margin) / COLS as f64,
            card_height: (page_height - 2.0 * margin) / ROWS as f64,
        }
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn card_width(&self) -> f64 {
        self.card_width
    }

    pub fn card_height(&self) -> f64 {
        self.card_height
    }

    /// Bottom-left corner of cell (col, row)
    pub fn cell_origin(&self, col: usize, row: usize) -> (f64, f64) {
        let x = self.margin + col as f64 * self.card_width;
        let y = self.page_height - self.margin - (row + 1) as f64 * self.card_height;
        (x, y)
    }

    /// Full bounds of a cell
    pub fn cell_rect(&self, cell: CellPos) -> Rect {
        let (x, y) = self.cell_origin(cell.col, cell.row);
        Rect::new(x, y, self.card_width, self.card_height)
    }

    /// Area of a cell that card text is fitted into
    pub fn text_box(&self, cell: CellPos) -> Rect {
        self.cell_rect(cell).inset(TEXT_INSET_X, TEXT_INSET_Y)
    }

    /// Page area inside the margins
    pub fn printable_area(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.page_width - 2.0 * self.margin,
            self.page_height - 2.0 * self.margin,
        )
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellPos> {
        (0..CARDS_PER_SHEET).map(CellPos::from_index)
    }

    /// Cut guides along every internal grid boundary
    pub fn cut_lines(&self) -> Vec<Segment> {
        let area = self.printable_area();
        let mut lines = Vec::with_capacity(COLS + ROWS - 2);

        for i in 1..COLS {
            let x = self.margin + i as f64 * self.card_width;
            lines.push(Segment::new(x, area.y, x, area.top()));
        }
        for j in 1..ROWS {
            let y = self.margin + j as f64 * self.card_height;
            lines.push(Segment::new(area.x, y, area.right(), y));
        }

        lines
    }

    /// Registration ticks just outside the four corners of the printable area
    pub fn corner_marks(&self) -> Vec<Segment> {
        let l = CORNER_MARK_LENGTH;
        let o = CORNER_MARK_OFFSET;
        let left = self.margin;
        let bottom = self.margin;
        let right = self.page_width - self.margin;
        let top = self.page_height - self.margin;

        vec![
            // bottom-left
            Segment::new(left - o, bottom, left - o, bottom + l),
            Segment::new(left, bottom - o, left + l, bottom - o),
            // bottom-right
            Segment::new(right + o, bottom, right + o, bottom + l),
            Segment::new(right - l, bottom - o, right, bottom - o),
            // top-left
            Segment::new(left - o, top - l, left - o, top),
            Segment::new(left, top + o, left + l, top + o),
            // top-right
            Segment::new(right + o, top - l, right + o, top),
            Segment::new(right - l, top + o, right, top + o),
        ]
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_card_size() {
        let grid = GridGeometry::letter();
        assert_eq!(grid.card_width(), 270.0);
        assert_eq!(grid.card_height(), 180.0);
    }

    #[test]
    fn test_cell_origin() {
        let grid = GridGeometry::letter();
        assert_eq!(grid.cell_origin(0, 0), (36.0, 576.0));
        assert_eq!(grid.cell_origin(1, 0), (306.0, 576.0));
        assert_eq!(grid.cell_origin(0, 3), (36.0, 36.0));
        assert_eq!(grid.cell_origin(1, 3), (306.0, 36.0));
    }

    #[test]
    fn test_cells_tile_printable_area() {
        let grid = GridGeometry::letter();
        let area = grid.printable_area();
        let total: f64 = grid
            .cells()
            .map(|c| {
                let r = grid.cell_rect(c);
                r.width * r.height
            })
            .sum();
        assert!((total - area.width * area.height).abs() < 1e-6);
        assert_eq!(grid.cells().count(), CARDS_PER_SHEET);
    }

    #[test]
    fn test_text_box_inset() {
        let grid = GridGeometry::letter();
        let tb = grid.text_box(CellPos::new(0, 0));
        assert_eq!(tb, Rect::new(46.0, 588.0, 250.0, 156.0));
    }

    #[test]
    fn test_cell_pos_index_roundtrip() {
        for k in 0..CARDS_PER_SHEET {
            assert_eq!(CellPos::from_index(k).index(), k);
        }
        assert_eq!(CellPos::from_index(5), CellPos::new(2, 1));
    }

    #[test]
    fn test_cut_lines() {
        let grid = GridGeometry::letter();
        let lines = grid.cut_lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.iter().filter(|s| s.is_vertical()).count(), 1);
        assert_eq!(lines.iter().filter(|s| s.is_horizontal()).count(), 3);
        assert_eq!(lines[0], Segment::new(306.0, 36.0, 306.0, 756.0));
        assert_eq!(lines[1], Segment::new(36.0, 216.0, 576.0, 216.0));
    }

    #[test]
    fn test_corner_marks_outside_printable_area() {
        let grid = GridGeometry::letter();
        let area = grid.printable_area();
        let marks = grid.corner_marks();
        assert_eq!(marks.len(), 8);
        for mark in marks {
            let inside_x = mark.x1 > area.x && mark.x1 < area.right();
            let inside_y = mark.y1 > area.y && mark.y1 < area.top();
            assert!(!(inside_x && inside_y));
        }
    }

    #[test]
    fn test_invalid_margin() {
        assert!(GridGeometry::new(612.0, 792.0, 400.0).is_err());
        assert!(GridGeometry::new(612.0, f64::NAN, 36.0).is_err());
        assert_eq!(GridGeometry::new(612.0, 792.0, 36.0).unwrap(), GridGeometry::letter());
    }

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
        assert_eq!(mm_to_pt(0.0), 0.0);
    }
}
