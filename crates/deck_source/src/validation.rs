//! Checks run on a deck before it is printed

use layout_engine::CARDS_PER_SHEET;
use render_model::Card;

/// 0-based indexes of cards with an empty or whitespace-only side
pub fn validate_cards(cards: &[Card]) -> Vec<usize> {
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| card.has_empty_side())
        .map(|(i, _)| i)
        .collect()
}

/// Card count and the number of sheets they print on
pub fn live_counts(cards: &[Card]) -> (usize, usize) {
    (cards.len(), cards.len().div_ceil(CARDS_PER_SHEET))
}

/// One message per card with an empty side, naming the row 1-based.
///
/// The front is reported when it is empty, otherwise the back.
pub fn empty_side_warnings(cards: &[Card]) -> Vec<String> {
    validate_cards(cards)
        .into_iter()
        .map(|i| {
            let side = if cards[i].front.trim().is_empty() {
                "Front"
            } else {
                "Back"
            };
            format!("Row {} has an empty {} field.", i + 1, side)
        })
        .collect()
}
