//! PDF Font Handling
//!
//! Card pages only use base-14 fonts, which viewers supply themselves. This
//! module hands out resource names for them and builds their font
//! dictionaries.

use super::objects::{PdfDictionary, PdfObject};
use std::collections::BTreeMap;
use text_engine::StandardFont;

/// A font registered with the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    /// Resource name used in content streams (e.g., "F1")
    pub name: String,
    pub standard_font: StandardFont,
}

/// Assigns resource names to fonts in order of first use
#[derive(Debug, Default)]
pub struct FontManager {
    fonts: BTreeMap<StandardFont, FontInfo>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource name for a font, registering it on first use
    pub fn resource_name(&mut self, font: StandardFont) -> &str {
        let next = self.fonts.len() + 1;
        &self
            .fonts
            .entry(font)
            .or_insert_with(|| FontInfo {
                name: format!("F{}", next),
                standard_font: font,
            })
            .name
    }

    /// Registered fonts ordered by resource name
    pub fn fonts(&self) -> Vec<&FontInfo> {
        let mut fonts: Vec<_> = self.fonts.values().collect();
        fonts.sort_by_key(|f| f.name[1..].parse::<usize>().unwrap_or(usize::MAX));
        fonts
    }
}

/// Create a font dictionary for a standard font
pub fn create_standard_font_dict(font: StandardFont) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("Font");
    dict.insert("Subtype", PdfObject::name("Type1"));
    dict.insert("BaseFont", PdfObject::name(font.pdf_name()));
    dict.insert("Encoding", PdfObject::name(font.encoding()));
    dict
}
