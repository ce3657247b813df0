//! Pairwise similarity scores keyed by unordered card pair

use crate::card::CardId;
use serde::Serialize;
use std::collections::HashMap;

/// Score of one unordered pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairScore {
    pub a: CardId,
    pub b: CardId,
    pub score: f64,
}

/// All pairwise scores of a pool, in deterministic pool order
///
/// Lookups are symmetric: `get(a, b) == get(b, a)`. Self pairs are never stored.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    pairs: Vec<PairScore>,
    index: HashMap<(CardId, CardId), usize>,
}

impl SimilarityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score. Self pairs are rejected; re-inserting a pair
    /// overwrites its score in place.
    pub fn insert(&mut self, a: CardId, b: CardId, score: f64) -> bool {
        if a == b {
            return false;
        }
        let key = pair_key(&a, &b);
        match self.index.get(&key) {
            Some(&i) => self.pairs[i].score = score,
            None => {
                self.index.insert(key, self.pairs.len());
                self.pairs.push(PairScore { a, b, score });
            }
        }
        true
    }

    pub fn get(&self, a: &CardId, b: &CardId) -> Option<f64> {
        self.index
            .get(&pair_key(a, b))
            .map(|&i| self.pairs[i].score)
    }

    pub fn pairs(&self) -> &[PairScore] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = &PairScore> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<PairScore> for SimilarityMatrix {
    fn from_iter<T: IntoIterator<Item = PairScore>>(iter: T) -> Self {
        let mut matrix = Self::new();
        for pair in iter {
            matrix.insert(pair.a, pair.b, pair.score);
        }
        matrix
    }
}

fn pair_key(a: &CardId, b: &CardId) -> (CardId, CardId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}
