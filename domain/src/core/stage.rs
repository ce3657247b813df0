//! Pipeline stages

use serde::{Deserialize, Serialize};

/// Stage of a deck-building run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// Configuration validation
    Config,
    /// Loading the card catalog
    Catalog,
    /// Resolving the commander by name
    Commander,
    /// Filtering the catalog down to the candidate pool
    Eligibility,
    /// Pairwise similarity scoring
    Similarity,
    /// Thresholded graph construction
    Graph,
    /// Ranked deck selection
    Selection,
}

impl PipelineStage {
    pub fn as_str(&self) -> &str {
        match self {
            PipelineStage::Config => "config",
            PipelineStage::Catalog => "catalog",
            PipelineStage::Commander => "commander",
            PipelineStage::Eligibility => "eligibility",
            PipelineStage::Similarity => "similarity",
            PipelineStage::Graph => "graph",
            PipelineStage::Selection => "selection",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            PipelineStage::Config => "Validating configuration",
            PipelineStage::Catalog => "Loading catalog",
            PipelineStage::Commander => "Resolving commander",
            PipelineStage::Eligibility => "Filtering eligible cards",
            PipelineStage::Similarity => "Scoring similarities",
            PipelineStage::Graph => "Building graph",
            PipelineStage::Selection => "Selecting deck",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
