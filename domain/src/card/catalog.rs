//! In-memory card catalog
//!
//! The catalog is materialized before a pipeline run starts and is passed
//! explicitly to every stage. Iteration order is insertion order, which keeps
//! every downstream stage reproducible.

use super::entities::{Card, CardId};
use crate::core::error::DomainError;
use std::collections::HashMap;

/// Read-only card catalog with lookup by id and by name
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_id: HashMap<CardId, usize>,
    by_name: HashMap<String, usize>,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, keeping the first card for any repeated id or name.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card);
        }
        catalog
    }

    /// Insert a card. Returns `false` (and drops the card) when its id or
    /// name is already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let name_key = normalize_name(&card.name);
        if self.by_id.contains_key(&card.id) || self.by_name.contains_key(&name_key) {
            return false;
        }
        let index = self.cards.len();
        self.by_id.insert(card.id.clone(), index);
        self.by_name.insert(name_key, index);
        self.cards.push(card);
        true
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.by_id.get(id).map(|&i| &self.cards[i])
    }

    /// Case-insensitive lookup by card name
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&i| &self.cards[i])
    }

    /// Resolve a caller-supplied commander name.
    pub fn resolve_commander(&self, name: &str) -> Result<&Card, DomainError> {
        self.find_by_name(name)
            .ok_or_else(|| DomainError::UnknownCommander(name.trim().to_string()))
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
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
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
