//! WinAnsiEncoding support
//!
//! Standard Type1 fonts are written with `/Encoding /WinAnsiEncoding`, which is
//! Latin-1 plus a handful of typographic characters in the 0x80-0x9F range.
//! Characters outside the encoding are replaced with `?`.

/// Replacement byte for characters that cannot be encoded
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Map a single character to its WinAnsi code, if it has one
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E => Some(code as u8),
        0xA0..=0xFF => Some(code as u8),
        _ => match ch {
            '\u{20AC}' => Some(0x80), // euro
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85), // ellipsis
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95), // bullet
            '\u{2013}' => Some(0x96), // en dash
            '\u{2014}' => Some(0x97), // em dash
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

/// Encode a string as WinAnsi bytes.
///
/// Tabs and other whitespace controls become spaces; anything else outside the
/// encoding becomes [`REPLACEMENT_BYTE`].
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| {
            if ch.is_whitespace() && !ch.is_ascii_graphic() && ch != '\u{A0}' {
                b' '
            } else {
                win_ansi_byte(ch).unwrap_or(REPLACEMENT_BYTE)
            }
        })
        .collect()
}

/// Check whether every character of the string survives encoding
pub fn is_win_ansi_encodable(text: &str) -> bool {
    text.chars().all(|ch| ch.is_whitespace() || win_ansi_byte(ch).is_some())
}
