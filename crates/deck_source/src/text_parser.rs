//! Free-text term/definition parsing
//!
//! Each non-blank line either starts a card (`term - definition`, optionally
//! numbered or bulleted) or continues the definition of the card before it.

use std::sync::OnceLock;

use regex_lite::Regex;
use render_model::Card;

use crate::error::{DeckSourceError, Result};
use crate::validation::empty_side_warnings;

/// Optional `1.`/`1)` number and bullet, a lazy term, then a dash, en dash,
/// em dash or colon followed by whitespace and the definition
const SEPARATOR_PATTERN: &str =
    r"^\s*(?:\d+[.|)]\s*)?(?:[•-]\s*)?(?P<term>.+?)\s*(?:[-–—:])\s+(?P<def>.+)\s*$";

/// Dashes after which a continuation line is joined without a space
const JOINING_DASHES: [char; 3] = ['-', '–', '—'];

/// Cards parsed from free text along with row warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedText {
    pub cards: Vec<Card>,
    pub warnings: Vec<String>,
}

fn separator() -> Result<&'static Regex> {
    static SEPARATOR: OnceLock<std::result::Result<Regex, String>> = OnceLock::new();
    SEPARATOR
        .get_or_init(|| Regex::new(SEPARATOR_PATTERN).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| DeckSourceError::Pattern(e.clone()))
}

/// Split text into cards, one per separator line
pub fn parse_pairs(text: &str) -> Result<Vec<Card>> {
    let separator = separator()?;
    let mut cards: Vec<Card> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(caps) = separator.captures(line) {
            let term = caps.name("term").map_or("", |m| m.as_str()).trim();
            let definition = caps.name("def").map_or("", |m| m.as_str()).trim();
            cards.push(Card::new(term, definition));
            continue;
        }

        match cards.last_mut() {
            Some(card) => {
                let joiner = if card.back.ends_with(JOINING_DASHES) { "" } else { " " };
                card.back = format!("{}{}{}", card.back, joiner, line).trim().to_string();
            }
            None => cards.push(Card::new(line, "")),
        }
    }

    Ok(cards)
}

/// Parse free text and report rows with an empty side
pub fn parse_free_text(text: &str) -> Result<ParsedText> {
    let cards = parse_pairs(text)?;
    let warnings = empty_side_warnings(&cards);
    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "free text rows with an empty side");
    }
    Ok(ParsedText { cards, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        parse_pairs(text)
            .unwrap()
            .into_iter()
            .map(|c| (c.front, c.back))
            .collect()
    }

    fn pair(front: &str, back: &str) -> (String, String) {
        (front.to_string(), back.to_string())
    }

    #[test]
    fn test_separators() {
        let text = "cat - a small domestic feline\ndog: a domestic canine\n\
                    owl – a nocturnal bird\nbat — a flying mammal";
        assert_eq!(
            pairs(text),
            vec![
                pair("cat", "a small domestic feline"),
                pair("dog", "a domestic canine"),
                pair("owl", "a nocturnal bird"),
                pair("bat", "a flying mammal"),
            ]
        );
    }

    #[test]
    fn test_numbering_and_bullets_are_stripped() {
        let text = "1. mitosis – cell division\n2) meiosis - halves chromosomes\n• ATP — energy currency\n- DNA: genetic material";
        assert_eq!(
            pairs(text),
            vec![
                pair("mitosis", "cell division"),
                pair("meiosis", "halves chromosomes"),
                pair("ATP", "energy currency"),
                pair("DNA", "genetic material"),
            ]
        );
    }

    #[test]
    fn test_first_separator_splits() {
        assert_eq!(
            pairs("ratio: part - to - whole"),
            vec![pair("ratio", "part - to - whole")]
        );
    }

    #[test]
    fn test_separator_needs_following_space() {
        assert_eq!(pairs("well-known"), vec![pair("well-known", "")]);
    }

    #[test]
    fn test_continuation_lines() {
        let text = "photosynthesis - converts light\n  into chemical energy\n\nenzyme - a self-\nmade catalyst";
        assert_eq!(
            pairs(text),
            vec![
                pair("photosynthesis", "converts light into chemical energy"),
                pair("enzyme", "a self-made catalyst"),
            ]
        );
    }

    #[test]
    fn test_leading_orphan_line() {
        let parsed = parse_free_text("Chapter 3\ncat - feline").unwrap();
        assert_eq!(parsed.cards[0], Card::new("Chapter 3", ""));
        assert_eq!(parsed.cards[1], Card::new("cat", "feline"));
        assert_eq!(parsed.warnings, vec!["Row 1 has an empty Back field.".to_string()]);
    }

    #[test]
    fn test_empty_text() {
        let parsed = parse_free_text("  \n\n").unwrap();
        assert!(parsed.cards.is_empty());
        assert!(parsed.warnings.is_empty());
    }
}
