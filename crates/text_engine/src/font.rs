//! Standard PDF fonts used for card text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base-14 fonts available to every PDF viewer without embedding.
///
/// Terms are set in the bold face, definitions and footers in the regular face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandardFont {
    /// Helvetica
    Helvetica,
    /// Helvetica Bold
    HelveticaBold,
}

impl StandardFont {
    /// Get the PDF BaseFont name for this font
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Get the font encoding written into the font dictionary
    pub fn encoding(&self) -> &'static str {
        "WinAnsiEncoding"
    }

    /// Whether this is a bold face
    pub fn is_bold(&self) -> bool {
        matches!(self, StandardFont::HelveticaBold)
    }
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pdf_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_font_names() {
        assert_eq!(StandardFont::Helvetica.pdf_name(), "Helvetica");
        assert_eq!(StandardFont::HelveticaBold.pdf_name(), "Helvetica-Bold");
        assert_eq!(StandardFont::HelveticaBold.to_string(), "Helvetica-Bold");
    }

    #[test]
    fn test_bold_flag() {
        assert!(StandardFont::HelveticaBold.is_bold());
        assert!(!StandardFont::Helvetica.is_bold());
    }
}
