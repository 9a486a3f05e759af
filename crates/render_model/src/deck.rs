//! Cards, decks, and sheets

use layout_engine::{CellPos, CARDS_PER_SHEET};
use serde::{Deserialize, Serialize};

/// A front/back text pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Whether either side is empty or whitespace-only
    pub fn has_empty_side(&self) -> bool {
        self.front.trim().is_empty() || self.back.trim().is_empty()
    }
}

impl<F: Into<String>, B: Into<String>> From<(F, B)> for Card {
    fn from((front, back): (F, B)) -> Self {
        Card::new(front, back)
    }
}

/// An ordered collection of cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of sheets needed to print every card
    pub fn sheet_count(&self) -> usize {
        self.cards.len().div_ceil(CARDS_PER_SHEET)
    }

    /// Cards grouped by sheet, in order
    pub fn sheets(&self) -> impl Iterator<Item = Sheet<'_>> {
        self.cards
            .chunks(CARDS_PER_SHEET)
            .enumerate()
            .map(|(index, cards)| Sheet { index, cards })
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

/// Up to eight consecutive cards printed on one piece of paper
#[derive(Debug, Clone, Copy)]
pub struct Sheet<'a> {
    pub index: usize,
    pub cards: &'a [Card],
}

impl<'a> Sheet<'a> {
    /// Deck index of the first card on this sheet
    pub fn first_card_index(&self) -> usize {
        self.index * CARDS_PER_SHEET
    }

    /// Cards paired with their front cell and deck index
    pub fn placements(&self) -> impl Iterator<Item = (usize, CellPos, &'a Card)> + '_ {
        let base = self.first_card_index();
        self.cards
            .iter()
            .enumerate()
            .map(move |(k, card)| (base + k, CellPos::from_index(k), card))
    }
}
