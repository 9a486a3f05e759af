//! Render Model to PDF Conversion
//!
//! Turns a composed [`PageRender`] into a content stream. Everything on a page
//! is drawn under the page transform: back pages open with `q`, the rotation
//! and offset `cm` operators, and close with `Q`.

use super::content::ContentStream;
use super::fonts::FontManager;
use render_model::{Color, DashPattern, GlyphRun, PageRender, RenderItem};

/// Stroke state last written to the stream
#[derive(Debug, Clone, Copy, PartialEq)]
struct StrokeState {
    width: f64,
    dash: Option<DashPattern>,
    color: Color,
}

/// PDF page renderer
#[derive(Debug, Default)]
pub struct PdfRenderer {
    font_manager: FontManager,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fonts used by every page rendered so far
    pub fn font_manager(&self) -> &FontManager {
        &self.font_manager
    }

    /// Render a page to a content stream
    pub fn render_page(&mut self, page: &PageRender) -> ContentStream {
        let mut content = ContentStream::new();

        let matrices = page.transform.matrices();
        let transformed = !matrices.is_empty();
        if transformed {
            content.save_state();
            for matrix in matrices {
                content.transform(matrix);
            }
        }

        self.render_lines(&mut content, page);
        self.render_text(&mut content, page);

        if transformed {
            content.restore_state();
        }

        content
    }

    /// Stroke every line item, changing width, dash and color only when needed
    fn render_lines(&self, content: &mut ContentStream, page: &PageRender) {
        let mut lines = page.items.iter().filter_map(|item| match item {
            RenderItem::Line { x1, y1, x2, y2, color, width, dash } => {
                Some((*x1, *y1, *x2, *y2, StrokeState { width: *width, dash: *dash, color: *color }))
            }
            _ => None,
        }).peekable();

        if lines.peek().is_none() {
            return;
        }

        content.save_state();
        let mut current: Option<StrokeState> = None;
        for (x1, y1, x2, y2, state) in lines {
            let previous = current.replace(state);
            if previous.map(|p| p.width) != Some(state.width) {
                content.set_line_width(state.width);
            }
            if previous.map(|p| p.color) != Some(state.color) {
                let (r, g, b) = state.color.to_unit();
                content.set_stroke_rgb(r, g, b);
            }
            if previous.map(|p| p.dash) != Some(state.dash) {
                match state.dash {
                    Some(dash) => content.set_dash(&[dash.on, dash.off], 0.0),
                    None => content.clear_dash(),
                };
            }
            content.line(x1, y1, x2, y2);
        }
        content.restore_state();
    }

    /// Show every glyph run inside one text object
    fn render_text(&mut self, content: &mut ContentStream, page: &PageRender) {
        let runs: Vec<&GlyphRun> = page.glyph_runs().collect();
        if runs.is_empty() {
            return;
        }

        content.begin_text();
        let mut current_font: Option<(String, f64)> = None;
        let mut current_color: Option<Color> = None;

        for run in runs {
            let name = self.font_manager.resource_name(run.font).to_string();
            let font_changed = match &current_font {
                Some((current, size)) => *current != name || *size != run.font_size,
                None => true,
            };
            if font_changed {
                content.set_font(&name, run.font_size);
                current_font = Some((name, run.font_size));
            }

            if current_color != Some(run.color) {
                let (r, g, b) = run.color.to_unit();
                content.set_fill_rgb(r, g, b);
                current_color = Some(run.color);
            }

            content.set_text_position(run.x, run.y).show_text(&run.text);
        }
        content.end_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_engine::{DuplexMode, PageTransform};
    use render_model::PageSide;
    use text_engine::StandardFont;

    fn page(transform: PageTransform, items: Vec<RenderItem>) -> PageRender {
        PageRender {
            page_index: 0,
            sheet_index: 0,
            side: PageSide::Front,
            width: 612.0,
            height: 792.0,
            transform,
            items,
            placements: Vec::new(),
        }
    }

    fn run(text: &str, font: StandardFont, size: f64) -> RenderItem {
        RenderItem::GlyphRun(GlyphRun {
            text: text.to_string(),
            font,
            font_size: size,
            color: Color::BLACK,
            x: 100.0,
            y: 700.0,
        })
    }

    fn render(page: &PageRender) -> (String, PdfRenderer) {
        let mut renderer = PdfRenderer::new();
        let content = renderer.render_page(page);
        (String::from_utf8_lossy(content.as_bytes()).into_owned(), renderer)
    }

    #[test]
    fn test_empty_page_has_empty_stream() {
        let (out, renderer) = render(&page(PageTransform::identity(612.0, 792.0), vec![]));
        assert!(out.is_empty());
        assert!(renderer.font_manager().fonts().is_empty());
    }

    #[test]
    fn test_text_font_switching() {
        let items = vec![
            run("cat", StandardFont::HelveticaBold, 20.0),
            run("dog", StandardFont::HelveticaBold, 20.0),
            run("Bio", StandardFont::Helvetica, 8.0),
        ];
        let (out, renderer) = render(&page(PageTransform::identity(612.0, 792.0), items));
        assert_eq!(out.matches("Tf").count(), 2);
        assert!(out.contains("/F1 20 Tf"));
        assert!(out.contains("/F2 8 Tf"));
        assert!(out.contains("(cat) Tj"));
        assert_eq!(out.matches("BT").count(), 1);
        assert_eq!(renderer.font_manager().fonts().len(), 2);
    }

    #[test]
    fn test_dashed_lines_set_state_once() {
        let dashed = |x: f64| RenderItem::Line {
            x1: x,
            y1: 36.0,
            x2: x,
            y2: 756.0,
            color: Color::BLACK,
            width: 0.5,
            dash: Some(DashPattern::CUT_GUIDE),
        };
        let (out, _) = render(&page(
            PageTransform::identity(612.0, 792.0),
            vec![dashed(306.0), dashed(200.0)],
        ));
        assert_eq!(out.matches("[3 3] 0 d").count(), 1);
        assert_eq!(out.matches("0.5 w").count(), 1);
        assert_eq!(out.matches(" l\nS\n").count(), 2);
        assert!(out.starts_with("q\n"));
        assert!(out.ends_with("Q\n"));
    }

    #[test]
    fn test_rotated_page_wraps_content() {
        let transform = PageTransform::for_back_page(DuplexMode::ShortEdge, 0.0, 0.0, 612.0, 792.0);
        let (out, _) = render(&page(transform, vec![run("feline", StandardFont::Helvetica, 14.0)]));
        assert!(out.starts_with("q\n-1 0 0 -1 612 792 cm\n"));
        assert!(out.ends_with("ET\nQ\n"));
    }

    #[test]
    fn test_offset_follows_rotation() {
        let transform = PageTransform::for_back_page(DuplexMode::ShortEdge, 25.4, 0.0, 612.0, 792.0);
        let (out, _) = render(&page(transform, vec![]));
        assert_eq!(out, "q\n-1 0 0 -1 612 792 cm\n1 0 0 1 72 0 cm\nQ\n");
    }
}
