//! Line Breaking
//!
//! Greedy word wrapping against measured string widths. Words are separated by
//! any run of whitespace and re-joined with single spaces.
//!
//! The algorithm:
//! 1. Split the text into words
//! 2. Append words to the current line while the joined line still fits
//! 3. Start a new line when the next word would overflow
//! 4. Never leave a line empty: a word wider than the box gets a line of its own

use text_engine::TextMeasure;

/// Wrap `text` into lines no wider than `max_width` at `font_size`.
///
/// Returns an empty vector for empty or whitespace-only text. A single word
/// that is wider than `max_width` is kept whole on its own line.
pub fn wrap_words<M>(text: &str, measure: &M, font_size: f64, max_width: f64) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let trial_len = current.len();
        current.push(' ');
        current.push_str(word);

        if measure.text_width(&current, font_size) > max_width {
            current.truncate(trial_len);
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
