//! Similarity engine
//!
//! ```text
//! score(a, b) = text_weight  * cosine(tfidf(a.text), tfidf(b.text))
//!             + type_weight  * jaccard(a.type_tokens, b.type_tokens)
//!             + color_weight * agreement(a.color_identity, b.color_identity)
//! ```
//!
//! Features are computed once per card in [`SimilarityEngine::prepare`]; the
//! O(n²) pairwise pass only combines precomputed features. Rows of the pass
//! run on the rayon pool and are merged in index order, so the resulting
//! [`SimilarityMatrix`] is identical from run to run.

use super::matrix::{PairScore, SimilarityMatrix};
use super::tfidf::{SparseVector, TfIdfModel};
use super::tokenizer::feature_terms;
use super::weights::SimilarityWeights;
use crate::card::{Card, CardId, ColorSet};
use crate::core::error::DomainError;
use crate::eligibility::CandidatePool;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Precomputed per-card features
#[derive(Debug, Clone)]
pub struct CardFeatures {
    pub id: CardId,
    pub text: SparseVector,
    pub type_tokens: BTreeSet<String>,
    pub colors: ColorSet,
}

/// Features of every card of one corpus
#[derive(Debug, Clone, Default)]
pub struct PreparedPool {
    features: Vec<CardFeatures>,
    vocabulary_size: usize,
}

impl PreparedPool {
    pub fn features(&self) -> &[CardFeatures] {
        &self.features
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }
}

/// Computes symmetric similarity scores in [0, 1]
#[derive(Debug, Clone, Copy)]
pub struct SimilarityEngine {
    weights: SimilarityWeights,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self {
            weights: SimilarityWeights::default(),
        }
    }
}

impl SimilarityEngine {
    /// Create an engine; fails fast on invalid weights.
    pub fn new(weights: SimilarityWeights) -> Result<Self, DomainError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> SimilarityWeights {
        self.weights
    }

    /// Fit TF-IDF over `cards` and extract every card's features.
    pub fn prepare<'a>(&self, cards: impl IntoIterator<Item = &'a Card>) -> PreparedPool {
        let cards: Vec<&Card> = cards.into_iter().collect();
        let documents: Vec<Vec<String>> = cards.iter().map(|c| feature_terms(&c.text)).collect();
        let model = TfIdfModel::fit(&documents);

        let features = cards
            .iter()
            .zip(&documents)
            .map(|(card, terms)| CardFeatures {
                id: card.id.clone(),
                text: model.transform(terms),
                type_tokens: card.type_line.tokens(),
                colors: card.color_identity(),
            })
            .collect();

        PreparedPool {
            features,
            vocabulary_size: model.vocabulary_size(),
        }
    }

    /// Score two cards against each other with TF-IDF fitted on just the pair.
    pub fn score(&self, a: &Card, b: &Card) -> f64 {
        let prepared = self.prepare([a, b]);
        self.score_features(&prepared.features[0], &prepared.features[1])
    }

    /// Combine precomputed features into one score in [0, 1].
    pub fn score_features(&self, a: &CardFeatures, b: &CardFeatures) -> f64 {
        let text = a.text.cosine(&b.text);
        let types = jaccard(&a.type_tokens, &b.type_tokens);
        let colors = a.colors.agreement(b.colors);

        let score = self.weights.text_weight * text
            + self.weights.type_weight * types
            + self.weights.color_weight * colors;
        score.clamp(0.0, 1.0)
    }

    /// Score every unordered pair of the pool.
    pub fn score_all(&self, pool: &CandidatePool) -> SimilarityMatrix {
        self.score_all_until(pool, || false).unwrap_or_default()
    }

    /// Like [`score_all`](Self::score_all), but `stop` is polled before each
    /// row; returns `None` as soon as it reports `true`.
    pub fn score_all_until<F>(&self, pool: &CandidatePool, stop: F) -> Option<SimilarityMatrix>
    where
        F: Fn() -> bool + Sync,
    {
        let prepared = self.prepare(pool.iter());
        let features = prepared.features();
        let n = features.len();

        debug!(
            "Scoring {} pairs over {} cards ({} terms)",
            n * n.saturating_sub(1) / 2,
            n,
            prepared.vocabulary_size()
        );

        let rows: Option<Vec<Vec<PairScore>>> = (0..n)
            .into_par_iter()
            .map(|i| {
                if stop() {
                    return None;
                }
                let row = ((i + 1)..n)
                    .map(|j| PairScore {
                        a: features[i].id.clone(),
                        b: features[j].id.clone(),
                        score: self.score_features(&features[i], &features[j]),
                    })
                    .collect();
                Some(row)
            })
            .collect();

        Some(rows?.into_iter().flatten().collect())
    }
}

/// Jaccard overlap; two empty sets share nothing.
fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(s: &str) -> ColorSet {
        s.parse().unwrap()
    }

    fn pool() -> CandidatePool {
        CandidatePool::from_cards([
            Card::new("1", "Serra Angel", "Creature — Angel")
                .with_colors(colors("W"))
                .with_text("Flying, vigilance"),
            Card::new("2", "Baneslayer Angel", "Creature — Angel")
                .with_colors(colors("W"))
                .with_text("Flying, first strike, lifelink, protection from Demons and from Dragons"),
            Card::new("3", "Llanowar Elves", "Creature — Elf Druid")
                .with_colors(colors("G"))
                .with_text("{T}: Add {G}."),
            Card::new("4", "Grizzly Bears", "Creature — Bear").with_colors(colors("G")),
            Card::new("5", "Wrath of God", "Sorcery")
                .with_colors(colors("W"))
                .with_text("Destroy all creatures. They can't be regenerated."),
            Card::new("6", "Sol Ring", "Artifact").with_text("{T}: Add {C}{C}."),
        ])
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let err = SimilarityEngine::new(SimilarityWeights::new(0.9, 0.9, 0.9)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)));
    }

    #[test]
    fn test_scores_are_symmetric_and_in_range() {
        let engine = SimilarityEngine::default();
        let pool = pool();
        let prepared = engine.prepare(pool.iter());
        for a in prepared.features() {
            for b in prepared.features() {
                if a.id == b.id {
                    continue;
                }
                let ab = engine.score_features(a, b);
                let ba = engine.score_features(b, a);
                assert_eq!(ab, ba);
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_pairwise_score_symmetric() {
        let engine = SimilarityEngine::default();
        let pool = pool();
        let a = pool.get(0).unwrap();
        let b = pool.get(1).unwrap();
        assert_eq!(engine.score(a, b), engine.score(b, a));
    }

    #[test]
    fn test_related_cards_score_higher() {
        let engine = SimilarityEngine::default();
        let matrix = engine.score_all(&pool());
        let angels = matrix.get(&"1".into(), &"2".into()).unwrap();
        let angel_elf = matrix.get(&"1".into(), &"3".into()).unwrap();
        assert!(angels > angel_elf);
    }

    #[test]
    fn test_score_all_covers_every_pair_once() {
        let engine = SimilarityEngine::default();
        let pool = pool();
        let matrix = engine.score_all(&pool);
        let n = pool.len();
        assert_eq!(matrix.len(), n * (n - 1) / 2);
        assert!(matrix.iter().all(|p| p.a != p.b));
        assert!(matrix.iter().all(|p| (0.0..=1.0).contains(&p.score)));
    }

    #[test]
    fn test_score_all_is_deterministic() {
        let engine = SimilarityEngine::default();
        let pool = pool();
        let first = engine.score_all(&pool);
        let second = engine.score_all(&pool);
        assert_eq!(first.pairs(), second.pairs());
    }

    #[test]
    fn test_empty_text_scores_zero_on_text_signal() {
        let engine = SimilarityEngine::new(SimilarityWeights::new(1.0, 0.0, 0.0)).unwrap();
        let bears = Card::new("4", "Grizzly Bears", "Creature — Bear");
        let angel = Card::new("1", "Serra Angel", "Creature — Angel").with_text("Flying");
        assert_eq!(engine.score(&bears, &angel), 0.0);
        assert_eq!(engine.score(&bears, &bears.clone().with_text("")), 0.0);
    }

    #[test]
    fn test_color_only_weights() {
        let engine = SimilarityEngine::new(SimilarityWeights::new(0.0, 0.0, 1.0)).unwrap();
        let w = Card::new("1", "A", "Instant").with_colors(colors("W"));
        let wu = Card::new("2", "B", "Instant").with_colors(colors("WU"));
        assert!((engine.score(&w, &wu) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_score_all_until_stops_when_asked() {
        let engine = SimilarityEngine::default();
        let pool = pool();
        assert!(engine.score_all_until(&pool, || true).is_none());

        let full = engine.score_all_until(&pool, || false).unwrap();
        assert_eq!(full.pairs(), engine.score_all(&pool).pairs());
    }

    #[test]
    fn test_score_all_until_stops_mid_pass() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let engine = SimilarityEngine::default();
        let pool = pool();
        let polled = AtomicUsize::new(0);
        let result = engine.score_all_until(&pool, || polled.fetch_add(1, Ordering::SeqCst) >= 2);
        assert!(result.is_none());
        assert!(polled.load(Ordering::SeqCst) >= 3);
    }

    #[test]
    fn test_single_card_pool_has_no_pairs() {
        let engine = SimilarityEngine::default();
        let pool = CandidatePool::from_cards([Card::new("1", "Opt", "Instant")]);
        assert!(engine.score_all(&pool).is_empty());
    }
}
