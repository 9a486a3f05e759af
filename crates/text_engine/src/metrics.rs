//! Text metrics for the standard fonts
//!
//! Advance widths come from the Adobe Font Metrics files shipped with the
//! base-14 fonts, in thousandths of an em.

use crate::encoding::encode_win_ansi;
use crate::font::StandardFont;

/// Glyph space units per em for Type1 AFM widths
pub const UNITS_PER_EM: f64 = 1000.0;

/// Width used for codes without a table entry
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica widths for codes 0x20..=0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Helvetica-Bold widths for codes 0x20..=0x7E
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Something that can measure the advance width of a string.
///
/// The layout engine only needs widths; line height is derived from the font
/// size, so no vertical metrics are exposed.
pub trait TextMeasure {
    /// Width of `text` in points when set at `font_size`
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

impl StandardFont {
    /// Advance width of a WinAnsi code in thousandths of an em
    pub fn glyph_width(&self, code: u8) -> u16 {
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };

        match code {
            0x20..=0x7E => table[(code - 0x20) as usize],
            _ => self.extended_width(code),
        }
    }

    /// Widths for the upper half of WinAnsi
    fn extended_width(&self, code: u8) -> u16 {
        let bold = self.is_bold();
        match code {
            0x85 | 0x97 | 0x89 => 1000,
            0x96 => 556,
            0x95 => 350,
            0x91 | 0x92 | 0x82 => if bold { 278 } else { 222 },
            0x93 | 0x94 | 0x84 => if bold { 500 } else { 333 },
            0x80 => 556,
            0x99 => 1000,
            0xA0 => 278,
            0xA9 | 0xAE => 737,
            0xB0 => 400,
            0xC6 => 1000,
            0xD7 | 0xF7 => 584,
            0xDF => 611,
            0xE6 => 889,
            0xC0..=0xFF => match base_letter(code) {
                Some(base) => self.glyph_width(base),
                None => DEFAULT_WIDTH,
            },
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of a string in points at the given size
    pub fn string_width(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| self.glyph_width(code) as u32)
            .sum();
        units as f64 * font_size / UNITS_PER_EM
    }
}

impl TextMeasure for StandardFont {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        self.string_width(text, font_size)
    }
}

/// Unaccented letter sharing the advance width of an accented Latin-1 letter
fn base_letter(code: u8) -> Option<u8> {
    let base = match code {
        0xC0..=0xC5 => b'A',
        0xC7 => b'C',
        0xC8..=0xCB => b'E',
        0xCC..=0xCF => b'I',
        0xD0 => b'D',
        0xD1 => b'N',
        0xD2..=0xD6 | 0xD8 => b'O',
        0xD9..=0xDC => b'U',
        0xDD => b'Y',
        0xDE => b'P',
        0xE0..=0xE5 => b'a',
        0xE7 => b'c',
        0xE8..=0xEB => b'e',
        0xEC..=0xEF => b'I', // dotless i is as wide as capital I
        0xF0 | 0xF2..=0xF6 | 0xF8 => b'o',
        0xF1 => b'n',
        0xF9..=0xFC => b'u',
        0xFD | 0xFF => b'y',
        0xFE => b'p',
        _ => return None,
    };
    Some(base)
}
