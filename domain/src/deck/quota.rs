//! Per-type card quotas
//!
//! Optional caps on how many cards of each primary type a deck may hold.
//! The defaults follow a common 99-card split; types without a cap (lands,
//! planeswalkers, battles) are unlimited.

use crate::card::{Card, CardType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum cards per primary type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeQuotas {
    pub creature: usize,
    pub artifact: usize,
    pub enchantment: usize,
    pub instant: usize,
    pub sorcery: usize,
}

impl Default for TypeQuotas {
    fn default() -> Self {
        Self {
            creature: 31,
            artifact: 6,
            enchantment: 6,
            instant: 10,
            sorcery: 10,
        }
    }
}

impl TypeQuotas {
    pub fn limit_for(&self, card_type: CardType) -> Option<usize> {
        match card_type {
            CardType::Creature => Some(self.creature),
            CardType::Artifact => Some(self.artifact),
            CardType::Enchantment => Some(self.enchantment),
            CardType::Instant => Some(self.instant),
            CardType::Sorcery => Some(self.sorcery),
            _ => None,
        }
    }
}

/// Running per-type counts against a [`TypeQuotas`]
#[derive(Debug)]
pub(crate) struct QuotaTracker {
    quotas: TypeQuotas,
    counts: HashMap<CardType, usize>,
}

impl QuotaTracker {
    pub(crate) fn new(quotas: TypeQuotas) -> Self {
        Self {
            quotas,
            counts: HashMap::new(),
        }
    }

    /// Count `card` if its primary type still has room; `false` means skip it.
    pub(crate) fn try_admit(&mut self, card: &Card) -> bool {
        let Some(card_type) = card.type_line.primary_type() else {
            return true;
        };
        let Some(limit) = self.quotas.limit_for(card_type) else {
            return true;
        };
        let count = self.counts.entry(card_type).or_default();
        if *count >= limit {
            return false;
        }
        *count += 1;
        true
    }
}
