//! Deck entities

use crate::card::{Card, CardId};
use serde::Serialize;

/// Number of cards beside the commander in a singleton commander deck
pub const DECK_SIZE: usize = 99;

/// A selected card and the relevance that ranked it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckEntry {
    pub card: Card,
    /// Weighted degree of the card in the similarity graph
    pub relevance: f64,
}

/// A built deck (Entity)
///
/// Entries are in selection order, most relevant first. The commander is
/// kept alongside but is never one of the entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    commander: Card,
    entries: Vec<DeckEntry>,
}

impl Deck {
    pub(crate) fn new(commander: Card, entries: Vec<DeckEntry>) -> Self {
        Self { commander, entries }
    }

    pub fn commander(&self) -> &Card {
        &self.commander
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.entries.iter().map(|e| &e.card)
    }

    pub fn ids(&self) -> Vec<&CardId> {
        self.entries.iter().map(|e| &e.card.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.entries.iter().any(|e| &e.card.id == id)
    }

    /// Case-insensitive lookup of a deck entry by card name
    pub fn find_by_name(&self, name: &str) -> Option<&DeckEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.card.name.eq_ignore_ascii_case(name))
    }
}
