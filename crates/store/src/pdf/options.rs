//! PDF Export Options
//!
//! Document metadata and output settings that sit beside the render
//! configuration.

use super::document::{DocumentInfo, PdfVersion};
use serde::{Deserialize, Serialize};

/// Options for PDF export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Whether to deflate content streams
    #[serde(default = "default_compress")]
    pub compress: bool,
    #[serde(default)]
    pub pdf_version: PdfVersionOption,
}

fn default_compress() -> bool {
    true
}

/// PDF version option for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PdfVersionOption {
    #[default]
    V14,
    V17,
}

impl From<PdfVersionOption> for PdfVersion {
    fn from(opt: PdfVersionOption) -> Self {
        match opt {
            PdfVersionOption::V14 => PdfVersion::V1_4,
            PdfVersionOption::V17 => PdfVersion::V1_7,
        }
    }
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: Vec::new(),
            compress: default_compress(),
            pdf_version: PdfVersionOption::default(),
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Add a keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Set compression enabled/disabled
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_version(mut self, version: PdfVersionOption) -> Self {
        self.pdf_version = version;
        self
    }

    /// Information dictionary contents, without a creation date
    pub(crate) fn document_info(&self) -> DocumentInfo {
        DocumentInfo {
            title: self.title.clone(),
            author: self.author.clone(),
            subject: self.subject.clone(),
            keywords: self.keywords.clone(),
            ..DocumentInfo::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = PdfExportOptions::default();
        assert!(opts.compress);
        assert!(opts.title.is_none());
        assert_eq!(opts.pdf_version, PdfVersionOption::V14);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = PdfExportOptions::new()
            .with_title("Biology")
            .with_author("Ms. Rivera")
            .with_keyword("cells")
            .with_compression(false)
            .with_version(PdfVersionOption::V17);

        assert_eq!(opts.title.as_deref(), Some("Biology"));
        assert_eq!(opts.author.as_deref(), Some("Ms. Rivera"));
        assert_eq!(opts.keywords, vec!["cells".to_string()]);
        assert!(!opts.compress);
        assert_eq!(PdfVersion::from(opts.pdf_version), PdfVersion::V1_7);
    }

    #[test]
    fn test_document_info_keeps_producer() {
        let info = PdfExportOptions::new().with_subject("Cells").document_info();
        assert_eq!(info.subject.as_deref(), Some("Cells"));
        assert_eq!(info.producer.as_deref(), Some("FlashDeck"));
        assert!(info.creation_date.is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let opts: PdfExportOptions = serde_json::from_str(r#"{"pdfVersion":"v17"}"#).unwrap();
        assert!(opts.compress);
        assert_eq!(opts.pdf_version, PdfVersionOption::V17);
    }
}
