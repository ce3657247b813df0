//! Domain layer for deckweaver
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Pipeline
//!
//! ```text
//! CardCatalog ─► EligibilityFilter ─► SimilarityEngine ─► GraphBuilder ─► DeckSelector ─► Deck
//!                  (CandidatePool)     (SimilarityMatrix)   (SimilarityGraph)
//! ```
//!
//! - **Eligibility**: color identity subset of the commander's, plus the
//!   tribal type on every non-exempt card
//! - **Similarity**: weighted blend of rules-text TF-IDF cosine, type-line
//!   overlap and color overlap, in [0, 1] and symmetric
//! - **Graph**: edges only for pairs scoring strictly above the threshold
//! - **Selection**: candidates ranked by weighted degree, ties by card id

pub mod card;
pub mod config;
pub mod core;
pub mod deck;
pub mod eligibility;
pub mod graph;
pub mod similarity;

// Re-export commonly used types
pub use card::{Card, CardCatalog, CardId, CardType, Color, ColorSet, TypeLine};
pub use config::OutputFormat;
pub use core::{error::DomainError, stage::PipelineStage};
pub use deck::{DECK_SIZE, Deck, DeckEntry, DeckSelector, TypeQuotas};
pub use eligibility::{CandidatePool, EligibilityFilter, EligibilityRules};
pub use graph::{
    DEFAULT_SIMILARITY_THRESHOLD, GraphBuilder, GraphEdge, GraphNode, SimilarityGraph,
};
pub use similarity::{
    CardFeatures, PairScore, PreparedPool, SimilarityEngine, SimilarityMatrix, SimilarityWeights,
};
