//! Duplex back-side registration
//!
//! A printer flips the sheet either along its long edge or its short edge.
//! Each convention fixes where the back of a card has to be drawn so that it
//! lands behind its front once the paper is turned over.

use crate::grid::{mm_to_pt, CellPos, COLS, ROWS};
use crate::{LayoutError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Printer duplexing convention
///
/// Serialized as its [`key`](DuplexMode::key); deserialization goes through
/// the strict [`FromStr`] parser, so labels are accepted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DuplexMode {
    /// Long-edge flip, back columns mirrored
    #[default]
    LongEdgeMirrored,
    /// Long-edge flip, back laid out like the front
    LongEdgeNonMirrored,
    /// Short-edge flip, back page rotated 180 degrees
    ShortEdge,
}

/// Where a card's back is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackPosition {
    pub row: usize,
    pub col: usize,
    pub rotate_180: bool,
}

impl BackPosition {
    pub fn cell(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }
}

impl DuplexMode {
    pub const ALL: [DuplexMode; 3] = [
        DuplexMode::LongEdgeMirrored,
        DuplexMode::LongEdgeNonMirrored,
        DuplexMode::ShortEdge,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            DuplexMode::LongEdgeMirrored => "Long-edge mirrored (default)",
            DuplexMode::LongEdgeNonMirrored => "Long-edge non-mirrored",
            DuplexMode::ShortEdge => "Short-edge (rotate back 180°)",
        }
    }

    /// Stable identifier used in config files and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            DuplexMode::LongEdgeMirrored => "long-edge-mirrored",
            DuplexMode::LongEdgeNonMirrored => "long-edge-non-mirrored",
            DuplexMode::ShortEdge => "short-edge",
        }
    }

    /// Leading words of the label that identify the mode
    fn label_stem(&self) -> &'static str {
        match self {
            DuplexMode::LongEdgeMirrored => "long-edge mirrored",
            DuplexMode::LongEdgeNonMirrored => "long-edge non-mirrored",
            DuplexMode::ShortEdge => "short-edge",
        }
    }

    pub fn rotates_back_page(&self) -> bool {
        matches!(self, DuplexMode::ShortEdge)
    }

    /// Map a front cell to the cell its back is drawn in
    pub fn map_back_position(&self, row: usize, col: usize) -> BackPosition {
        match self {
            DuplexMode::LongEdgeMirrored => BackPosition {
                row,
                col: COLS - 1 - col,
                rotate_180: false,
            },
            DuplexMode::LongEdgeNonMirrored => BackPosition {
                row,
                col,
                rotate_180: false,
            },
            DuplexMode::ShortEdge => BackPosition {
                row: ROWS - 1 - row,
                col: COLS - 1 - col,
                rotate_180: true,
            },
        }
    }

    /// [`map_back_position`](Self::map_back_position) for a [`CellPos`]
    pub fn map_cell(&self, cell: CellPos) -> BackPosition {
        self.map_back_position(cell.row, cell.col)
    }

    /// Parse a label the way the interactive form does.
    ///
    /// Matches on the label's leading words; anything unrecognized falls back
    /// to [`DuplexMode::LongEdgeMirrored`].
    pub fn from_label_lenient(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        for mode in Self::ALL {
            if normalized.starts_with(mode.label_stem()) {
                return mode;
            }
        }

        tracing::warn!(label, "unknown duplex mode, using long-edge mirrored");
        DuplexMode::LongEdgeMirrored
    }
}

impl FromStr for DuplexMode {
    type Err = LayoutError;

    /// Accepts keys (`short-edge`), full labels, and label stems, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| {
                normalized == mode.key()
                    || normalized == mode.label_stem()
                    || normalized == mode.label().to_lowercase()
            })
            .ok_or_else(|| LayoutError::UnknownDuplexMode(s.to_string()))
    }
}

impl Serialize for DuplexMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for DuplexMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DuplexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coordinate transform applied to every drawing operation on a page.
///
/// When rotating, the page is turned 180 degrees about its center first; the
/// offset is then applied inside the rotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageTransform {
    pub rotate_180: bool,
    /// Horizontal offset in points
    pub offset_x: f64,
    /// Vertical offset in points
    pub offset_y: f64,
    pub page_width: f64,
    pub page_height: f64,
}

impl PageTransform {
    /// No rotation, no offset
    pub fn identity(page_width: f64, page_height: f64) -> Self {
        Self {
            rotate_180: false,
            offset_x: 0.0,
            offset_y: 0.0,
            page_width,
            page_height,
        }
    }

    /// Transform for a back page under `mode` with a millimeter correction
    pub fn for_back_page(
        mode: DuplexMode,
        offset_x_mm: f64,
        offset_y_mm: f64,
        page_width: f64,
        page_height: f64,
    ) -> Self {
        Self {
            rotate_180: mode.rotates_back_page(),
            offset_x: mm_to_pt(offset_x_mm),
            offset_y: mm_to_pt(offset_y_mm),
            page_width,
            page_height,
        }
    }

    pub fn is_identity(&self) -> bool {
        !self.rotate_180 && self.offset_x == 0.0 && self.offset_y == 0.0
    }

    /// Where a point drawn at (x, y) ends up on the page
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let (x, y) = (x + self.offset_x, y + self.offset_y);
        if self.rotate_180 {
            (self.page_width - x, self.page_height - y)
        } else {
            (x, y)
        }
    }

    /// `cm` operands in the order they are emitted
    pub fn matrices(&self) -> Vec<[f64; 6]> {
        let mut out = Vec::with_capacity(2);
        if self.rotate_180 {
            out.push([-1.0, 0.0, 0.0, -1.0, self.page_width, self.page_height]);
        }
        if self.offset_x != 0.0 || self.offset_y != 0.0 {
            out.push([1.0, 0.0, 0.0, 1.0, self.offset_x, self.offset_y]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{LETTER_HEIGHT, LETTER_WIDTH};
    use proptest::prelude::*;

    #[test]
    fn test_mirrored_mapping() {
        let pos = DuplexMode::LongEdgeMirrored.map_back_position(0, 0);
        assert_eq!(pos, BackPosition { row: 0, col: 1, rotate_180: false });
        let pos = DuplexMode::LongEdgeMirrored.map_back_position(2, 1);
        assert_eq!(pos.cell(), CellPos::new(2, 0));
    }

    #[test]
    fn test_non_mirrored_is_identity() {
        for k in 0..crate::CARDS_PER_SHEET {
            let cell = CellPos::from_index(k);
            let pos = DuplexMode::LongEdgeNonMirrored.map_cell(cell);
            assert_eq!(pos.cell(), cell);
            assert!(!pos.rotate_180);
        }
    }

    #[test]
    fn test_short_edge_mapping() {
        let pos = DuplexMode::ShortEdge.map_back_position(0, 0);
        assert_eq!(pos, BackPosition { row: 3, col: 1, rotate_180: true });
        let pos = DuplexMode::ShortEdge.map_back_position(3, 1);
        assert_eq!(pos.cell(), CellPos::new(0, 0));
    }

    #[test]
    fn test_mappings_are_involutions() {
        for mode in DuplexMode::ALL {
            for k in 0..crate::CARDS_PER_SHEET {
                let cell = CellPos::from_index(k);
                let once = mode.map_cell(cell);
                let twice = mode.map_cell(once.cell());
                assert_eq!(twice.cell(), cell, "{mode:?}");
            }
        }
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(DuplexMode::default(), DuplexMode::LongEdgeMirrored);
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!("short-edge".parse::<DuplexMode>().unwrap(), DuplexMode::ShortEdge);
        assert_eq!(
            "Long-edge mirrored (default)".parse::<DuplexMode>().unwrap(),
            DuplexMode::LongEdgeMirrored
        );
        assert_eq!(
            "LONG-EDGE NON-MIRRORED".parse::<DuplexMode>().unwrap(),
            DuplexMode::LongEdgeNonMirrored
        );
        assert_eq!(
            "Short-edge (rotate back 180°)".parse::<DuplexMode>().unwrap(),
            DuplexMode::ShortEdge
        );

        let err = "sideways".parse::<DuplexMode>().unwrap_err();
        assert!(matches!(err, LayoutError::UnknownDuplexMode(ref s) if s == "sideways"));
    }

    #[test]
    fn test_key_and_label_roundtrip() {
        for mode in DuplexMode::ALL {
            assert_eq!(mode.key().parse::<DuplexMode>().unwrap(), mode);
            assert_eq!(mode.to_string().parse::<DuplexMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(
            DuplexMode::from_label_lenient("Long-edge non-mirrored (my printer)"),
            DuplexMode::LongEdgeNonMirrored
        );
        assert_eq!(
            DuplexMode::from_label_lenient("Short-edge"),
            DuplexMode::ShortEdge
        );
        assert_eq!(
            DuplexMode::from_label_lenient("upside down"),
            DuplexMode::LongEdgeMirrored
        );
    }

    #[test]
    fn test_serde_uses_keys() {
        let json = serde_json::to_string(&DuplexMode::ShortEdge).unwrap();
        assert_eq!(json, "\"short-edge\"");
        let mode: DuplexMode = serde_json::from_str("\"long-edge-non-mirrored\"").unwrap();
        assert_eq!(mode, DuplexMode::LongEdgeNonMirrored);
        let mode: DuplexMode = serde_json::from_str("\"Short-edge\"").unwrap();
        assert_eq!(mode, DuplexMode::ShortEdge);
        assert!(serde_json::from_str::<DuplexMode>("\"sideways\"").is_err());
    }

    #[test]
    fn test_identity_transform() {
        let t = PageTransform::identity(LETTER_WIDTH, LETTER_HEIGHT);
        assert!(t.is_identity());
        assert!(t.matrices().is_empty());
        assert_eq!(t.apply(10.0, 20.0), (10.0, 20.0));
    }

    #[test]
    fn test_offset_transform() {
        let t = PageTransform::for_back_page(
            DuplexMode::LongEdgeMirrored,
            25.4,
            -25.4,
            LETTER_WIDTH,
            LETTER_HEIGHT,
        );
        let (x, y) = t.apply(100.0, 100.0);
        assert!((x - 172.0).abs() < 1e-9);
        assert!((y - 28.0).abs() < 1e-9);
        assert_eq!(t.matrices().len(), 1);
    }

    #[test]
    fn test_rotated_transform() {
        let t = PageTransform::for_back_page(DuplexMode::ShortEdge, 0.0, 0.0, LETTER_WIDTH, LETTER_HEIGHT);
        assert_eq!(t.apply(0.0, 0.0), (612.0, 792.0));
        assert_eq!(
            t.matrices(),
            vec![[-1.0, 0.0, 0.0, -1.0, 612.0, 792.0]]
        );
    }

    #[test]
    fn test_offset_applied_inside_rotated_frame() {
        let t = PageTransform::for_back_page(DuplexMode::ShortEdge, 25.4, 0.0, LETTER_WIDTH, LETTER_HEIGHT);
        // a +1in shift in the rotated frame moves content left on the page
        let (x, _) = t.apply(100.0, 100.0);
        assert!((x - 440.0).abs() < 1e-9);
        let matrices = t.matrices();
        assert_eq!(matrices.len(), 2);
        assert_eq!(matrices[0][0], -1.0);
        assert!((matrices[1][4] - 72.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn mapped_cells_stay_on_grid(row in 0usize..ROWS, col in 0usize..COLS) {
            for mode in DuplexMode::ALL {
                let pos = mode.map_back_position(row, col);
                prop_assert!(pos.row < ROWS);
                prop_assert!(pos.col < COLS);
                prop_assert_eq!(pos.rotate_180, mode.rotates_back_page());
            }
        }
    }
}
