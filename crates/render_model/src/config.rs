//! Render configuration

use crate::{RenderError, Result};
use layout_engine::DuplexMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Hard limits for either font size
pub const FONT_SIZE_LIMITS: RangeInclusive<f64> = 1.0..=96.0;
/// Front sizes that print legibly on a card
pub const RECOMMENDED_FRONT_SIZES: RangeInclusive<f64> = 10.0..=36.0;
/// Back sizes that print legibly on a card
pub const RECOMMENDED_BACK_SIZES: RangeInclusive<f64> = 10.0..=20.0;

/// Font size of the per-card footer
pub const FOOTER_FONT_SIZE: f64 = 8.0;

/// Order of subject and lesson in the card footer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FooterTemplate {
    /// `{subject} • {lesson}`
    #[default]
    SubjectLesson,
    /// `{lesson} • {subject}`
    LessonSubject,
}

impl FooterTemplate {
    pub fn pattern(&self) -> &'static str {
        match self {
            FooterTemplate::SubjectLesson => "{subject} \u{2022} {lesson}",
            FooterTemplate::LessonSubject => "{lesson} \u{2022} {subject}",
        }
    }

    /// Fill in the placeholders
    pub fn render(&self, subject: &str, lesson: &str) -> String {
        self.pattern()
            .replace("{subject}", subject)
            .replace("{lesson}", lesson)
    }
}

impl FromStr for FooterTemplate {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "subject-lesson" | "subjectlesson" => Ok(FooterTemplate::SubjectLesson),
            "lesson-subject" | "lessonsubject" => Ok(FooterTemplate::LessonSubject),
            other => Err(RenderError::InvalidConfig(format!(
                "unknown footer template '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for FooterTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Everything that controls how a deck is laid out and printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(default)]
    pub duplex_mode: DuplexMode,
    /// Horizontal back-page correction in millimeters
    #[serde(default)]
    pub offset_x_mm: f64,
    /// Vertical back-page correction in millimeters
    #[serde(default)]
    pub offset_y_mm: f64,
    #[serde(default)]
    pub show_corner_markers: bool,
    #[serde(default = "default_show_cut_lines")]
    pub show_cut_lines: bool,
    #[serde(default)]
    pub show_footer: bool,
    #[serde(default)]
    pub footer_template: FooterTemplate,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub lesson: String,
    /// Starting size for the front (term) text
    #[serde(default = "default_front_font_size")]
    pub front_font_size: f64,
    /// Starting size for the back (definition) text
    #[serde(default = "default_back_font_size")]
    pub back_font_size: f64,
}

fn default_show_cut_lines() -> bool {
    true
}

fn default_front_font_size() -> f64 {
    20.0
}

fn default_back_font_size() -> f64 {
    14.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            duplex_mode: DuplexMode::default(),
            offset_x_mm: 0.0,
            offset_y_mm: 0.0,
            show_corner_markers: false,
            show_cut_lines: default_show_cut_lines(),
            show_footer: false,
            footer_template: FooterTemplate::default(),
            subject: String::new(),
            lesson: String::new(),
            front_font_size: default_front_font_size(),
            back_font_size: default_back_font_size(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplex_mode(mut self, mode: DuplexMode) -> Self {
        self.duplex_mode = mode;
        self
    }

    /// Set the duplex mode from a key or UI label
    pub fn with_duplex_label(self, label: &str) -> Result<Self> {
        Ok(self.with_duplex_mode(label.parse::<DuplexMode>()?))
    }

    pub fn with_offsets_mm(mut self, x: f64, y: f64) -> Self {
        self.offset_x_mm = x;
        self.offset_y_mm = y;
        self
    }

    pub fn with_corner_markers(mut self, show: bool) -> Self {
        self.show_corner_markers = show;
        self
    }

    pub fn with_cut_lines(mut self, show: bool) -> Self {
        self.show_cut_lines = show;
        self
    }

    /// Enable the footer with the given subject and lesson
    pub fn with_footer(
        mut self,
        template: FooterTemplate,
        subject: impl Into<String>,
        lesson: impl Into<String>,
    ) -> Self {
        self.show_footer = true;
        self.footer_template = template;
        self.subject = subject.into();
        self.lesson = lesson.into();
        self
    }

    pub fn with_font_sizes(mut self, front: f64, back: f64) -> Self {
        self.front_font_size = front;
        self.back_font_size = back;
        self
    }

    /// Footer text for every card, or `None` when no footer is drawn.
    ///
    /// A footer with neither subject nor lesson is treated as disabled.
    pub fn footer_text(&self) -> Option<String> {
        if !self.show_footer {
            return None;
        }
        let subject = self.subject.trim();
        let lesson = self.lesson.trim();
        if subject.is_empty() && lesson.is_empty() {
            return None;
        }
        Some(self.footer_template.render(subject, lesson))
    }

    /// Check value ranges.
    ///
    /// Font sizes must be whole points. Sizes outside the recommended ranges are accepted with a warning.
    pub fn validate(&self) -> Result<()> {
        check_size("front", self.front_font_size, &RECOMMENDED_FRONT_SIZES)?;
        check_size("back", self.back_font_size, &RECOMMENDED_BACK_SIZES)?;

        for (axis, value) in [("x", self.offset_x_mm), ("y", self.offset_y_mm)] {
            if !value.is_finite() {
                return Err(RenderError::InvalidConfig(format!(
                    "{} offset must be a finite number of millimeters",
                    axis
                )));
            }
        }

        Ok(())
    }
}

fn check_size(side: &str, size: f64, recommended: &RangeInclusive<f64>) -> Result<()> {
    if !size.is_finite() || !FONT_SIZE_LIMITS.contains(&size) {
        return Err(RenderError::InvalidConfig(format!(
            "{} font size {} is outside {}..={}",
            side,
            size,
            FONT_SIZE_LIMITS.start(),
            FONT_SIZE_LIMITS.end()
        )));
    }
    if size.fract() != 0.0 {
        return Err(RenderError::InvalidConfig(format!(
            "{} font size {} must be a whole number of points",
            side, size
        )));
    }
    if !recommended.contains(&size) {
        tracing::warn!(
            side,
            size,
            min = recommended.start(),
            max = recommended.end(),
            "font size outside the recommended range"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.duplex_mode, DuplexMode::LongEdgeMirrored);
        assert!(config.show_cut_lines);
        assert!(!config.show_corner_markers);
        assert!(!config.show_footer);
        assert_eq!(config.front_font_size, 20.0);
        assert_eq!(config.back_font_size, 14.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{"duplexMode":"short-edge","offsetXMm":1.5}"#).unwrap();
        assert_eq!(config.duplex_mode, DuplexMode::ShortEdge);
        assert_eq!(config.offset_x_mm, 1.5);
        assert!(config.show_cut_lines);
        assert_eq!(config.front_font_size, 20.0);
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(RenderConfig::default()).unwrap();
        assert!(json.get("showCornerMarkers").is_some());
        assert!(json.get("frontFontSize").is_some());
        assert_eq!(json["footerTemplate"], "SubjectLesson");
    }

    #[test]
    fn test_unknown_duplex_mode_rejected() {
        let result: std::result::Result<RenderConfig, _> =
            serde_json::from_str(r#"{"duplexMode":"sideways"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplex_label() {
        let config = RenderConfig::default()
            .with_duplex_label("Short-edge")
            .unwrap();
        assert_eq!(config.duplex_mode, DuplexMode::ShortEdge);
        assert!(matches!(
            RenderConfig::default().with_duplex_label("sideways"),
            Err(RenderError::Layout(_))
        ));
    }

    #[test]
    fn test_footer_text() {
        let config = RenderConfig::default();
        assert_eq!(config.footer_text(), None);

        let config = config.with_footer(FooterTemplate::SubjectLesson, "Biology", "Cells");
        assert_eq!(config.footer_text().as_deref(), Some("Biology \u{2022} Cells"));

        let config = config.with_footer(FooterTemplate::LessonSubject, "Biology", "Cells");
        assert_eq!(config.footer_text().as_deref(), Some("Cells \u{2022} Biology"));

        let config = config.with_footer(FooterTemplate::SubjectLesson, " ", "");
        assert_eq!(config.footer_text(), None);
    }

    #[test]
    fn test_footer_template_parse() {
        assert_eq!("lesson-subject".parse::<FooterTemplate>().unwrap(), FooterTemplate::LessonSubject);
        assert!("subject-only".parse::<FooterTemplate>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(RenderConfig::default().with_font_sizes(0.0, 14.0).validate().is_err());
        assert!(RenderConfig::default().with_font_sizes(20.0, 200.0).validate().is_err());
        assert!(RenderConfig::default().with_font_sizes(f64::NAN, 14.0).validate().is_err());
        assert!(RenderConfig::default()
            .with_offsets_mm(f64::INFINITY, 0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_fractional_sizes() {
        assert!(RenderConfig::default().with_font_sizes(20.0, 14.5).validate().is_err());
        assert!(RenderConfig::default().with_font_sizes(12.25, 14.0).validate().is_err());
        assert!(RenderConfig::default().with_font_sizes(12.0, 14.0).validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_unrecommended_sizes() {
        assert!(RenderConfig::default().with_font_sizes(48.0, 6.0).validate().is_ok());
    }
}
