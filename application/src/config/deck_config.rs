//! Deck-building configuration.
//!
//! [`DeckBuildConfig`] carries every tunable of one pipeline run. It is
//! validated once, before any computation starts.

use deckweaver_domain::{
    DECK_SIZE, DEFAULT_SIMILARITY_THRESHOLD, DomainError, EligibilityRules, SimilarityWeights,
    TypeQuotas,
};
use serde::{Deserialize, Serialize};

/// Tunables of a deck-building run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckBuildConfig {
    /// Minimum similarity (exclusive) for a graph edge, in [0, 1].
    pub similarity_threshold: f64,
    /// Maximum number of cards beside the commander.
    pub deck_size: usize,
    /// Signal weights; must sum to 1.
    #[serde(flatten)]
    pub weights: SimilarityWeights,
    /// Tribe-exemption rules for the eligibility filter.
    #[serde(flatten)]
    pub eligibility: EligibilityRules,
    /// Per-type caps, carried even while enforcement is off.
    pub type_quotas: TypeQuotas,
    /// Apply `type_quotas` during selection.
    pub enforce_type_quotas: bool,
}

impl Default for DeckBuildConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            deck_size: DECK_SIZE,
            weights: SimilarityWeights::default(),
            eligibility: EligibilityRules::default(),
            type_quotas: TypeQuotas::default(),
            enforce_type_quotas: false,
        }
    }
}

impl DeckBuildConfig {
    // ==================== Builder Methods ====================

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.deck_size = deck_size;
        self
    }

    pub fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_eligibility(mut self, rules: EligibilityRules) -> Self {
        self.eligibility = rules;
        self
    }

    /// Set the caps and turn enforcement on.
    pub fn with_type_quotas(mut self, quotas: TypeQuotas) -> Self {
        self.type_quotas = quotas;
        self.enforce_type_quotas = true;
        self
    }

    /// The caps selection should apply, if enforcement is on
    pub fn active_type_quotas(&self) -> Option<TypeQuotas> {
        self.enforce_type_quotas.then_some(self.type_quotas)
    }

    // ==================== Validation ====================

    /// Fail fast on out-of-range values.
    pub fn validate(&self) -> Result<(), DomainError> {
        let t = self.similarity_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(DomainError::InvalidConfig(format!(
                "similarity_threshold must be within [0, 1], got {}",
                t
            )));
        }
        if self.deck_size == 0 {
            return Err(DomainError::InvalidConfig(
                "deck_size must be at least 1".to_string(),
            ));
        }
        self.weights.validate()
    }
}
