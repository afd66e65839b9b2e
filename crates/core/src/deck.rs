//! Deck validation
//!
//! A session only ever sees a [`Deck`], and a `Deck` can only be built from a
//! card list where every pair id is carried by exactly two cards and every
//! card id is unique.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::types::{Card, CardId, PairId};

/// Reasons a card list cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck has no cards")]
    Empty,

    #[error("deck has an odd number of cards ({0})")]
    OddCardCount(usize),

    #[error("pair '{pair_id}' has {count} card(s), expected 2")]
    UnpairedCard { pair_id: PairId, count: usize },

    #[error("card id '{0}' appears more than once")]
    DuplicateCardId(CardId),
}

/// A well-formed deck in its original (unshuffled) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Validate and wrap a card list.
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut ids = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !ids.insert(&card.id) {
                return Err(DeckError::DuplicateCardId(card.id.clone()));
            }
        }

        // Report the first offending pair in deck order so errors are stable.
        let mut counts: HashMap<&PairId, usize> = HashMap::new();
        for card in &cards {
            *counts.entry(&card.pair_id).or_insert(0) += 1;
        }
        for card in &cards {
            let count = counts[&card.pair_id];
            if count != 2 {
                if count == 1 && cards.len() % 2 == 1 {
                    return Err(DeckError::OddCardCount(cards.len()));
                }
                return Err(DeckError::UnpairedCard {
                    pair_id: card.pair_id.clone(),
                    count,
                });
            }
        }

        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    /// One card per pair, in deck order (the pre-game review list).
    pub fn preview_faces(&self) -> Vec<&Card> {
        let mut seen = HashSet::new();
        self.cards
            .iter()
            .filter(|c| seen.insert(&c.pair_id))
            .collect()
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = DeckError;

    fn try_from(value: Vec<Card>) -> Result<Self, Self::Error> {
        Deck::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(p: &str) -> [Card; 2] {
        [
            Card::new(format!("{p}1"), p, format!("{p} front")),
            Card::new(format!("{p}2"), p, format!("{p} back")),
        ]
    }

    #[test]
    fn test_well_formed_deck() {
        let cards: Vec<Card> = ["A", "B", "C"].iter().flat_map(|p| pair(p)).collect();
        let deck = Deck::new(cards).unwrap();
        assert_eq!(deck.len(), 6);
        assert_eq!(deck.total_pairs(), 3);
    }

    #[test]
    fn test_single_pair_deck_is_valid() {
        let deck = Deck::new(pair("A").to_vec()).unwrap();
        assert_eq!(deck.total_pairs(), 1);
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert_eq!(Deck::new(vec![]), Err(DeckError::Empty));
    }

    #[test]
    fn test_odd_count_rejected() {
        let mut cards = pair("A").to_vec();
        cards.push(Card::new("B1", "B", "orphan"));
        assert_eq!(Deck::new(cards), Err(DeckError::OddCardCount(3)));
    }

    #[test]
    fn test_orphaned_pairs_rejected() {
        let cards = vec![
            Card::new("A1", "A", "a"),
            Card::new("B1", "B", "b"),
        ];
        assert_eq!(
            Deck::new(cards),
            Err(DeckError::UnpairedCard {
                pair_id: PairId::from("A"),
                count: 1
            })
        );
    }

    #[test]
    fn test_triple_pair_id_rejected() {
        let mut cards = pair("A").to_vec();
        cards.push(Card::new("A3", "A", "extra"));
        cards.push(Card::new("A4", "B", "other"));
        let err = Deck::new(cards).unwrap_err();
        assert!(matches!(err, DeckError::UnpairedCard { count: 3, .. }));
    }

    #[test]
    fn test_duplicate_card_id_rejected() {
        let cards = vec![Card::new("X", "A", "a"), Card::new("X", "A", "b")];
        assert_eq!(
            Deck::new(cards),
            Err(DeckError::DuplicateCardId(CardId::from("X")))
        );
    }

    #[test]
    fn test_preview_faces_one_per_pair() {
        let cards: Vec<Card> = ["A", "B"].iter().flat_map(|p| pair(p)).collect();
        let deck = Deck::new(cards).unwrap();
        let faces: Vec<&str> = deck.preview_faces().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(faces, vec!["A1", "B1"]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(DeckError::Empty.to_string(), "deck has no cards");
        assert_eq!(
            DeckError::OddCardCount(5).to_string(),
            "deck has an odd number of cards (5)"
        );
    }
}
