//! Shrink-to-fit text placement
//!
//! Card text is wrapped at a starting font size. If the wrapped block is taller
//! than the fitting target, the size drops one point at a time until the block
//! fits or the floor size is reached. Text still overflowing at the floor is
//! placed anyway.

use crate::line_breaker::wrap_words;
use crate::Rect;
use serde::{Deserialize, Serialize};
use text_engine::TextMeasure;

/// Smallest font size the fitter will choose
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Leading as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Share of the box width a top-anchored block is wrapped to
const TOP_ANCHORED_WIDTH_RATIO: f64 = 0.9;
/// Share of the box height a top-anchored block must fit in
const TOP_ANCHORED_HEIGHT_RATIO: f64 = 0.8;
/// Distance from the box top to the first baseline, in leadings
const TOP_ANCHORED_FIRST_BASELINE: f64 = 1.5;

/// How a block of lines is positioned inside its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitMode {
    /// Block centered vertically and horizontally (definitions)
    Centered,
    /// Block starting near the top, fitted to a reduced area (terms)
    TopAnchored,
}

impl FitMode {
    /// Width and height the wrapped block has to fit in
    pub fn fit_target(&self, bounds: &Rect) -> (f64, f64) {
        match self {
            FitMode::Centered => (bounds.width, bounds.height),
            FitMode::TopAnchored => (
                bounds.width * TOP_ANCHORED_WIDTH_RATIO,
                bounds.height * TOP_ANCHORED_HEIGHT_RATIO,
            ),
        }
    }
}

/// A line of text with its baseline start position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub text: String,
    /// Baseline start x
    pub x: f64,
    /// Baseline y
    pub y: f64,
    /// Measured width at the chosen size
    pub width: f64,
}

/// Result of fitting a string into a box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedText {
    /// Chosen font size
    pub font_size: f64,
    /// Lines in drawing order, top to bottom
    pub lines: Vec<PlacedLine>,
    /// Whether the block is still taller than its target at the chosen size
    pub overflow: bool,
}

impl FittedText {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * LINE_HEIGHT_FACTOR
    }

    pub fn block_height(&self) -> f64 {
        block_height(self.lines.len(), self.font_size)
    }
}

/// Height of `line_count` lines at `font_size`
pub fn block_height(line_count: usize, font_size: f64) -> f64 {
    line_count as f64 * font_size * LINE_HEIGHT_FACTOR
}

/// Fits text into boxes with a given measurer and size floor
pub struct TextFitter<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
    min_size: f64,
}

impl<'a, M: TextMeasure + ?Sized> TextFitter<'a, M> {
    /// Create a fitter with the default 8pt floor
    pub fn new(measure: &'a M) -> Self {
        Self {
            measure,
            min_size: MIN_FONT_SIZE,
        }
    }

    /// Override the size floor
    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Choose a size and wrap `text` so it fits `bounds` under `mode`.
    ///
    /// The chosen size is never above `start_size` (unless `start_size` is
    /// below the floor, in which case the floor is used) and never below the
    /// floor. At most `start_size - floor + 1` sizes are tried.
    pub fn fit(&self, text: &str, bounds: Rect, start_size: f64, mode: FitMode) -> FittedText {
        let (max_width, max_height) = mode.fit_target(&bounds);
        let mut size = start_size.max(self.min_size);

        let lines = loop {
            let lines = wrap_words(text, self.measure, size, max_width);
            if block_height(lines.len(), size) <= max_height || size - 1.0 < self.min_size {
                break lines;
            }
            size -= 1.0;
        };

        let overflow = block_height(lines.len(), size) > max_height;
        if overflow {
            tracing::debug!(
                font_size = size,
                lines = lines.len(),
                "text overflows its box at the minimum font size"
            );
        }

        let placed = self.place(lines, &bounds, size, mode);
        FittedText {
            font_size: size,
            lines: placed,
            overflow,
        }
    }

    /// Compute baseline positions for wrapped lines
    fn place(&self, lines: Vec<String>, bounds: &Rect, size: f64, mode: FitMode) -> Vec<PlacedLine> {
        let leading = size * LINE_HEIGHT_FACTOR;
        let first_baseline = match mode {
            FitMode::Centered => {
                let block = block_height(lines.len(), size);
                let bottom = bounds.y + (bounds.height - block) / 2.0;
                bottom + lines.len().saturating_sub(1) as f64 * leading
            }
            FitMode::TopAnchored => bounds.top() - leading * TOP_ANCHORED_FIRST_BASELINE,
        };

        lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let width = self.measure.text_width(&text, size);
                PlacedLine {
                    x: bounds.x + (bounds.width - width) / 2.0,
                    y: first_baseline - i as f64 * leading,
                    width,
                    text,
                }
            })
            .collect()
    }
}

/// Fit text with the default floor
pub fn fit_text<M>(text: &str, bounds: Rect, start_size: f64, mode: FitMode, measure: &M) -> FittedText
where
    M: TextMeasure + ?Sized,
{
    TextFitter::new(measure).fit(text, bounds, start_size, mode)
}
