//! Sheet composition
//!
//! Turns a deck into alternating front and back pages. Each sheet of up to
//! eight cards yields one front page and one back page; the back page places
//! every card at the cell its front maps to under the configured duplex mode.

use crate::config::FOOTER_FONT_SIZE;
use crate::{
    CardPlacement, Color, DashPattern, Deck, GlyphRun, PageRender, PageSide, RenderConfig,
    RenderItem, RenderModel, Result, Sheet,
};
use layout_engine::{CellPos, FitMode, GridGeometry, PageTransform, Segment, TextFitter};
use text_engine::{StandardFont, TextMeasure};

/// Stroke width of cut guides
pub const CUT_LINE_WIDTH: f64 = 0.5;
/// Stroke width of corner registration marks
pub const CORNER_MARK_WIDTH: f64 = 1.0;

/// Gap between the footer and the card's right edge
const FOOTER_RIGHT_PADDING: f64 = 6.0;
/// Height of the footer baseline above the card's bottom edge
const FOOTER_BASELINE_RISE: f64 = 4.0;

/// Font for front (term) text
pub const FRONT_FONT: StandardFont = StandardFont::HelveticaBold;
/// Font for back (definition) text
pub const BACK_FONT: StandardFont = StandardFont::Helvetica;
/// Font for card footers
pub const FOOTER_FONT: StandardFont = StandardFont::Helvetica;

/// Lays decks out on Letter pages
pub struct SheetCompositor {
    config: RenderConfig,
    grid: GridGeometry,
}

impl SheetCompositor {
    /// Create a compositor after validating the config
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grid: GridGeometry::letter(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    /// Produce every page for the deck, front then back for each sheet
    pub fn compose(&self, deck: &Deck) -> RenderModel {
        let mut model = RenderModel::new();
        let footer = self.config.footer_text();

        for sheet in deck.sheets() {
            let front = self.front_page(&sheet, model.page_count() as u32, footer.as_deref());
            model.add_page(front);
            let back = self.back_page(&sheet, model.page_count() as u32, footer.as_deref());
            model.add_page(back);
        }

        tracing::debug!(
            cards = deck.len(),
            sheets = deck.sheet_count(),
            pages = model.page_count(),
            mode = %self.config.duplex_mode,
            "composed deck"
        );
        model
    }

    fn front_page(&self, sheet: &Sheet<'_>, page_index: u32, footer: Option<&str>) -> PageRender {
        let mut page = self.blank_page(
            sheet,
            page_index,
            PageSide::Front,
            PageTransform::identity(self.grid.page_width(), self.grid.page_height()),
        );

        for (card_index, cell, card) in sheet.placements() {
            self.place_text(&mut page, &card.front, cell, FitMode::TopAnchored);
            if let Some(text) = footer {
                self.place_footer(&mut page, text, cell);
            }
            page.placements.push(CardPlacement { card_index, cell });
        }

        page
    }

    fn back_page(&self, sheet: &Sheet<'_>, page_index: u32, footer: Option<&str>) -> PageRender {
        let mode = self.config.duplex_mode;
        let transform = PageTransform::for_back_page(
            mode,
            self.config.offset_x_mm,
            self.config.offset_y_mm,
            self.grid.page_width(),
            self.grid.page_height(),
        );
        let mut page = self.blank_page(sheet, page_index, PageSide::Back, transform);

        for (card_index, front_cell, card) in sheet.placements() {
            let cell = mode.map_cell(front_cell).cell();
            self.place_text(&mut page, &card.back, cell, FitMode::Centered);
            if let Some(text) = footer {
                self.place_footer(&mut page, text, cell);
            }
            page.placements.push(CardPlacement { card_index, cell });
        }

        page
    }

    /// Page with decorations only
    fn blank_page(
        &self,
        sheet: &Sheet<'_>,
        page_index: u32,
        side: PageSide,
        transform: PageTransform,
    ) -> PageRender {
        let mut items = Vec::new();

        if self.config.show_cut_lines {
            items.extend(
                self.grid
                    .cut_lines()
                    .into_iter()
                    .map(|s| line_item(s, CUT_LINE_WIDTH, Some(DashPattern::CUT_GUIDE))),
            );
        }
        if self.config.show_corner_markers {
            items.extend(
                self.grid
                    .corner_marks()
                    .into_iter()
                    .map(|s| line_item(s, CORNER_MARK_WIDTH, None)),
            );
        }

        PageRender {
            page_index,
            sheet_index: sheet.index,
            side,
            width: self.grid.page_width(),
            height: self.grid.page_height(),
            transform,
            items,
            placements: Vec::with_capacity(sheet.cards.len()),
        }
    }

    fn place_text(&self, page: &mut PageRender, text: &str, cell: CellPos, mode: FitMode) {
        let (font, start_size) = match page.side {
            PageSide::Front => (FRONT_FONT, self.config.front_font_size),
            PageSide::Back => (BACK_FONT, self.config.back_font_size),
        };

        let fitted = TextFitter::new(&font).fit(text, self.grid.text_box(cell), start_size, mode);
        tracing::trace!(
            row = cell.row,
            col = cell.col,
            font_size = fitted.font_size,
            lines = fitted.lines.len(),
            "placed card text"
        );

        page.items.extend(fitted.lines.into_iter().map(|line| {
            RenderItem::GlyphRun(GlyphRun {
                text: line.text,
                font,
                font_size: fitted.font_size,
                color: Color::BLACK,
                x: line.x,
                y: line.y,
            })
        }));
    }

    /// Right-aligned caption along the bottom edge of a cell
    fn place_footer(&self, page: &mut PageRender, text: &str, cell: CellPos) {
        let rect = self.grid.cell_rect(cell);
        let width = FOOTER_FONT.text_width(text, FOOTER_FONT_SIZE);
        page.items.push(RenderItem::GlyphRun(GlyphRun {
            text: text.to_string(),
            font: FOOTER_FONT,
            font_size: FOOTER_FONT_SIZE,
            color: Color::BLACK,
            x: rect.x + self.grid.card_width() - width - FOOTER_RIGHT_PADDING,
            y: rect.y + FOOTER_BASELINE_RISE,
        }));
    }
}

fn line_item(segment: Segment, width: f64, dash: Option<DashPattern>) -> RenderItem {
    RenderItem::Line {
        x1: segment.x1,
        y1: segment.y1,
        x2: segment.x2,
        y2: segment.y2,
        color: Color::BLACK,
        width,
        dash,
    }
}

/// Compose a deck with the given config
pub fn compose_deck(deck: &Deck, config: &RenderConfig) -> Result<RenderModel> {
    Ok(SheetCompositor::new(config.clone())?.compose(deck))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, FooterTemplate};
    use layout_engine::DuplexMode;
    use proptest::prelude::*;

    fn pets() -> Deck {
        Deck::new(vec![
            Card::new("cat", "a small domestic feline"),
            Card::new("dog", "a domestic canine"),
        ])
    }

    fn deck_of(n: usize) -> Deck {
        (0..n).map(|i| Card::new(format!("term {i}"), format!("definition {i}"))).collect()
    }

    /// Text drawn inside a cell's box, ignoring footers
    fn text_in_cell(page: &PageRender, grid: &GridGeometry, cell: CellPos) -> Vec<String> {
        let rect = grid.cell_rect(cell);
        page.glyph_runs()
            .filter(|run| run.font_size != FOOTER_FONT_SIZE)
            .filter(|run| rect.contains(run.x, run.y))
            .map(|run| run.text.clone())
            .collect()
    }

    #[test]
    fn test_two_cards_mirrored() {
        let compositor = SheetCompositor::new(RenderConfig::default()).unwrap();
        let grid = *compositor.grid();
        let model = compositor.compose(&pets());
        assert_eq!(model.page_count(), 2);

        let front = &model.pages[0];
        assert_eq!(front.side, PageSide::Front);
        assert_eq!(text_in_cell(front, &grid, CellPos::new(0, 0)), vec!["cat"]);
        assert_eq!(text_in_cell(front, &grid, CellPos::new(0, 1)), vec!["dog"]);

        let back = &model.pages[1];
        assert_eq!(back.side, PageSide::Back);
        assert!(back.transform.is_identity());
        assert_eq!(back.cell_of(0), Some(CellPos::new(0, 1)));
        assert_eq!(back.cell_of(1), Some(CellPos::new(0, 0)));
        assert_eq!(
            text_in_cell(back, &grid, CellPos::new(0, 1)),
            vec!["a small domestic feline"]
        );
        assert_eq!(text_in_cell(back, &grid, CellPos::new(0, 0)), vec!["a domestic canine"]);
    }

    #[test]
    fn test_fonts_per_side() {
        let model = compose_deck(&pets(), &RenderConfig::default()).unwrap();
        for run in model.pages[0].glyph_runs() {
            assert_eq!(run.font, StandardFont::HelveticaBold);
            assert_eq!(run.font_size, 20.0);
        }
        for run in model.pages[1].glyph_runs() {
            assert_eq!(run.font, StandardFont::Helvetica);
            assert_eq!(run.font_size, 14.0);
        }
    }

    #[test]
    fn test_nine_cards_four_pages() {
        let model = compose_deck(&deck_of(9), &RenderConfig::default()).unwrap();
        assert_eq!(model.page_count(), 4);
        let sides: Vec<_> = model.pages.iter().map(|p| p.side).collect();
        assert_eq!(
            sides,
            vec![PageSide::Front, PageSide::Back, PageSide::Front, PageSide::Back]
        );
        assert_eq!(model.pages[2].sheet_index, 1);
        assert_eq!(model.pages[2].placements.len(), 1);
        assert_eq!(model.pages[2].placements[0].card_index, 8);
        assert_eq!(model.pages[3].page_index, 3);
    }

    #[test]
    fn test_empty_deck_has_no_pages() {
        let model = compose_deck(&Deck::default(), &RenderConfig::default()).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_short_edge_rotates_back() {
        let config = RenderConfig::default().with_duplex_mode(DuplexMode::ShortEdge);
        let model = compose_deck(&pets(), &config).unwrap();
        assert!(!model.pages[0].transform.rotate_180);
        assert!(model.pages[1].transform.rotate_180);
        assert_eq!(model.pages[1].cell_of(0), Some(CellPos::new(3, 1)));
        assert_eq!(model.pages[1].cell_of(1), Some(CellPos::new(3, 0)));
    }

    #[test]
    fn test_offsets_only_on_back() {
        let config = RenderConfig::default().with_offsets_mm(2.0, -1.0);
        let model = compose_deck(&pets(), &config).unwrap();
        assert!(model.pages[0].transform.is_identity());
        let back = model.pages[1].transform;
        assert!((back.offset_x - layout_engine::mm_to_pt(2.0)).abs() < 1e-9);
        assert!((back.offset_y - layout_engine::mm_to_pt(-1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_decorations() {
        let model = compose_deck(&pets(), &RenderConfig::default()).unwrap();
        let lines: Vec<(f64, Option<DashPattern>)> = model.pages[0]
            .items
            .iter()
            .filter_map(|item| match item {
                RenderItem::Line { width, dash, .. } => Some((*width, *dash)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 4);
        for (width, dash) in lines {
            assert_eq!(width, CUT_LINE_WIDTH);
            assert_eq!(dash, Some(DashPattern::CUT_GUIDE));
        }

        let config = RenderConfig::default().with_cut_lines(false).with_corner_markers(true);
        let model = compose_deck(&pets(), &config).unwrap();
        for page in &model.pages {
            let lines = page
                .items
                .iter()
                .filter(|i| matches!(i, RenderItem::Line { dash: None, .. }))
                .count();
            assert_eq!(lines, 8);
        }
    }

    #[test]
    fn test_footer_position() {
        let config = RenderConfig::default().with_footer(FooterTemplate::SubjectLesson, "Bio", "Cells");
        let compositor = SheetCompositor::new(config).unwrap();
        let model = compositor.compose(&pets());

        let footers: Vec<_> = model.pages[0]
            .glyph_runs()
            .filter(|r| r.text == "Bio \u{2022} Cells")
            .collect();
        assert_eq!(footers.len(), 2);

        let width = FOOTER_FONT.text_width("Bio \u{2022} Cells", FOOTER_FONT_SIZE);
        let first = footers[0];
        assert!((first.x - (36.0 + 270.0 - width - 6.0)).abs() < 1e-9);
        assert_eq!(first.y, 576.0 + 4.0);
        assert_eq!(first.font_size, FOOTER_FONT_SIZE);

        // back footer of card 0 sits under its mapped cell (0, 1)
        let back_footer = model.pages[1]
            .glyph_runs()
            .find(|r| r.font_size == FOOTER_FONT_SIZE)
            .unwrap();
        assert!((back_footer.x - (306.0 + 270.0 - width - 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let deck = Deck::new(vec![Card::new("", "  ")]);
        let model = compose_deck(&deck, &RenderConfig::default()).unwrap();
        assert_eq!(model.page_count(), 2);
        assert_eq!(model.pages[0].glyph_runs().count(), 0);
        assert_eq!(model.pages[1].glyph_runs().count(), 0);
        assert_eq!(model.pages[1].placements.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig::default().with_font_sizes(0.0, 14.0);
        assert!(SheetCompositor::new(config).is_err());
    }

    proptest! {
        #[test]
        fn page_count_is_twice_sheet_count(n in 0usize..40) {
            let model = compose_deck(&deck_of(n), &RenderConfig::default()).unwrap();
            prop_assert_eq!(model.page_count(), 2 * n.div_ceil(8));
        }

        #[test]
        fn back_page_holds_every_card_of_the_sheet(n in 1usize..20, mode_index in 0usize..3) {
            let config = RenderConfig::default().with_duplex_mode(DuplexMode::ALL[mode_index]);
            let model = compose_deck(&deck_of(n), &config).unwrap();
            for pair in model.pages.chunks(2) {
                let front = &pair[0];
                let back = &pair[1];
                prop_assert_eq!(front.placements.len(), back.placements.len());
                for placement in &front.placements {
                    let mapped = config.duplex_mode.map_cell(placement.cell).cell();
                    prop_assert_eq!(back.cell_of(placement.card_index), Some(mapped));
                }
            }
        }
    }
}
