//! PDF Content Stream Generation
//!
//! A builder for the page content streams. Only the operators card pages use
//! are provided:
//!
//! - q/Q and cm: graphics state and transforms
//! - w, d, RG, rg: stroke width, dash pattern, colors
//! - m, l, S: straight line paths
//! - BT/ET, Tf, Tm, Tj: text

use super::objects::{escape_literal, format_number};
use std::io::Write;
use text_engine::encode_win_ansi;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
    /// Open q operators not yet closed
    depth: usize,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of saved graphics states still open
    pub fn depth(&self) -> usize {
        self.depth
    }

    // =========================================================================
    // Graphics State Operators
    // =========================================================================

    /// Save the current graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q");
        self.depth += 1;
        self
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.write_line("Q");
        self
    }

    /// Concatenate a matrix onto the current transform (cm)
    pub fn transform(&mut self, m: [f64; 6]) -> &mut Self {
        self.write_numbers(&m, "cm");
        self
    }

    /// Set the line width (w)
    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.write_numbers(&[width], "w");
        self
    }

    /// Set the dash pattern (d)
    pub fn set_dash(&mut self, array: &[f64], phase: f64) -> &mut Self {
        let parts: Vec<String> = array.iter().map(|v| format_number(*v)).collect();
        self.write_fmt(format_args!("[{}] {} d\n", parts.join(" "), format_number(phase)));
        self
    }

    /// Switch back to solid lines
    pub fn clear_dash(&mut self) -> &mut Self {
        self.set_dash(&[], 0.0)
    }

    /// Set the stroke color to RGB (RG)
    pub fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.write_numbers(&[r, g, b], "RG");
        self
    }

    /// Set the fill color to RGB (rg)
    pub fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.write_numbers(&[r, g, b], "rg");
        self
    }

    // =========================================================================
    // Path Operators
    // =========================================================================

    /// Move to a point (m)
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_numbers(&[x, y], "m");
        self
    }

    /// Line to a point (l)
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_numbers(&[x, y], "l");
        self
    }

    /// Stroke the current path (S)
    pub fn stroke(&mut self) -> &mut Self {
        self.write_line("S");
        self
    }

    /// A stroked segment from (x1, y1) to (x2, y2)
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.move_to(x1, y1).line_to(x2, y2).stroke()
    }

    // =========================================================================
    // Text Operators
    // =========================================================================

    /// Begin a text object (BT)
    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    /// End a text object (ET)
    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    /// Set the font resource and size (Tf)
    pub fn set_font(&mut self, resource_name: &str, size: f64) -> &mut Self {
        self.write_fmt(format_args!("/{} {} Tf\n", resource_name, format_number(size)));
        self
    }

    /// Place the text origin at (x, y) with no scaling (Tm)
    pub fn set_text_position(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_numbers(&[1.0, 0.0, 0.0, 1.0, x, y], "Tm");
        self
    }

    /// Show a string (Tj), encoded as WinAnsi
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.data.push(b'(');
        escape_literal(&encode_win_ansi(text), &mut self.data);
        self.write_line(") Tj");
        self
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }

    fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing into a Vec cannot fail
        let _ = self.data.write_fmt(args);
    }

    /// Operands separated by spaces, then the operator
    fn write_numbers(&mut self, operands: &[f64], operator: &str) {
        for n in operands {
            self.data.extend_from_slice(format_number(*n).as_bytes());
            self.data.push(b' ');
        }
        self.write_line(operator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &ContentStream) -> String {
        String::from_utf8_lossy(content.as_bytes()).into_owned()
    }

    #[test]
    fn test_state_and_transform() {
        let mut content = ContentStream::new();
        content
            .save_state()
            .transform([-1.0, 0.0, 0.0, -1.0, 612.0, 792.0])
            .transform([1.0, 0.0, 0.0, 1.0, 2.8346, 0.0]);
        assert_eq!(content.depth(), 1);
        content.restore_state();
        assert_eq!(content.depth(), 0);
        assert_eq!(
            text(&content),
            "q\n-1 0 0 -1 612 792 cm\n1 0 0 1 2.8346 0 cm\nQ\n"
        );
    }

    #[test]
    fn test_dashed_line() {
        let mut content = ContentStream::new();
        content
            .set_line_width(0.5)
            .set_dash(&[3.0, 3.0], 0.0)
            .line(306.0, 36.0, 306.0, 756.0)
            .clear_dash();
        assert_eq!(
            text(&content),
            "0.5 w\n[3 3] 0 d\n306 36 m\n306 756 l\nS\n[] 0 d\n"
        );
    }

    #[test]
    fn test_text_object() {
        let mut content = ContentStream::new();
        content
            .begin_text()
            .set_font("F1", 20.0)
            .set_text_position(145.55, 708.0)
            .show_text("cat")
            .end_text();
        assert_eq!(
            text(&content),
            "BT\n/F1 20 Tf\n1 0 0 1 145.55 708 Tm\n(cat) Tj\nET\n"
        );
    }

    #[test]
    fn test_show_text_escapes_and_encodes() {
        let mut content = ContentStream::new();
        content.show_text("f(x) \u{2022} caf\u{E9}");
        assert_eq!(text(&content), "(f\\(x\\) \\225 caf\\351) Tj\n");
    }
}
