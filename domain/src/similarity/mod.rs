//! Similarity domain
//!
//! Scores every unordered pair of candidate cards with a weighted blend of
//! three signals: rules-text TF-IDF cosine, type-line overlap and color
//! identity overlap. See [`engine`] for the formula.

pub mod engine;
pub mod matrix;
pub mod tfidf;
pub mod tokenizer;
pub mod weights;

pub use engine::{CardFeatures, PreparedPool, SimilarityEngine};
pub use matrix::{PairScore, SimilarityMatrix};
pub use weights::SimilarityWeights;
