//! Thresholded graph construction
//!
//! An edge `(a, b)` is added iff `similarity(a, b) > threshold`. The
//! inequality is strict: a pair scoring exactly at the threshold stays
//! unconnected.

use super::entities::{GraphNode, SimilarityGraph};
use crate::core::error::DomainError;
use crate::eligibility::CandidatePool;
use crate::similarity::SimilarityMatrix;
use tracing::debug;

/// Default edge threshold
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Builds a [`SimilarityGraph`] from a pool and its pairwise scores
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    threshold: f64,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl GraphBuilder {
    /// Create a builder; the threshold must be a finite value in [0, 1].
    pub fn new(threshold: f64) -> Result<Self, DomainError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(DomainError::InvalidConfig(format!(
                "similarity_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// One node per pool card, one edge per pair scoring above the threshold.
    ///
    /// Pairs naming cards outside the pool are ignored.
    pub fn build(&self, pool: &CandidatePool, similarities: &SimilarityMatrix) -> SimilarityGraph {
        let mut graph = SimilarityGraph::new(self.threshold);

        for card in pool.iter() {
            graph.add_node(GraphNode {
                id: card.id.clone(),
                name: card.name.clone(),
                colors: card.colors,
                type_line: card.type_line.raw().to_string(),
            });
        }

        for pair in similarities.iter() {
            if pair.score > self.threshold {
                graph.add_edge(&pair.a, &pair.b, pair.score);
            }
        }

        debug!(
            "Graph: {} nodes, {} edges above {}",
            graph.node_count(),
            graph.edge_count(),
            self.threshold
        );

        graph
    }
}
