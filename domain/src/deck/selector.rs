//! Ranked deck selection
//!
//! Every pool card is ranked by its weighted degree in the similarity graph:
//! a card well connected to many other eligible cards is thematically
//! central to the deck. Ties break on ascending card id. The selector takes
//! the first `deck_size` cards of that ranking, skipping any that would
//! overflow an enabled [`TypeQuotas`] cap.

use super::entities::{DECK_SIZE, Deck, DeckEntry};
use super::quota::{QuotaTracker, TypeQuotas};
use crate::card::Card;
use crate::eligibility::CandidatePool;
use crate::graph::SimilarityGraph;
use std::collections::HashSet;
use tracing::debug;

/// Selects a fixed-size deck from a ranked pool
#[derive(Debug, Clone, Copy)]
pub struct DeckSelector {
    deck_size: usize,
    quotas: Option<TypeQuotas>,
}

impl Default for DeckSelector {
    fn default() -> Self {
        Self::new(DECK_SIZE)
    }
}

impl DeckSelector {
    pub fn new(deck_size: usize) -> Self {
        Self {
            deck_size,
            quotas: None,
        }
    }

    pub fn with_type_quotas(mut self, quotas: TypeQuotas) -> Self {
        self.quotas = Some(quotas);
        self
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Pool cards paired with their relevance, most relevant first
    pub fn rank<'p>(
        &self,
        graph: &SimilarityGraph,
        pool: &'p CandidatePool,
    ) -> Vec<(&'p Card, f64)> {
        let mut ranked: Vec<(&Card, f64)> = pool
            .iter()
            .map(|card| (card, graph.weighted_degree(&card.id)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
        ranked
    }

    /// Select up to `deck_size` cards. A pool smaller than `deck_size`
    /// yields a smaller deck.
    pub fn select(&self, graph: &SimilarityGraph, commander: &Card, pool: &CandidatePool) -> Deck {
        let mut tracker = self.quotas.map(QuotaTracker::new);
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.deck_size.min(pool.len()));

        for (card, relevance) in self.rank(graph, pool) {
            if entries.len() >= self.deck_size {
                break;
            }
            if card.id == commander.id || seen.contains(&card.id) {
                continue;
            }
            if let Some(tracker) = tracker.as_mut() {
                if !tracker.try_admit(card) {
                    continue;
                }
            }
            seen.insert(card.id.clone());
            entries.push(DeckEntry {
                card: card.clone(),
                relevance,
            });
        }

        debug!(
            "Selected {} of {} candidates (deck size {})",
            entries.len(),
            pool.len(),
            self.deck_size
        );

        Deck::new(commander.clone(), entries)
    }
}
