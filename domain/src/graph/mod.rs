//! Similarity graph domain

pub mod builder;
pub mod entities;

pub use builder::{DEFAULT_SIMILARITY_THRESHOLD, GraphBuilder};
pub use entities::{GraphEdge, GraphNode, SimilarityGraph};
