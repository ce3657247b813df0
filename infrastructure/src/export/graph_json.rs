//! Similarity graph export
//!
//! Writes the graph as a JSON document for external visualizers. The
//! document carries the request that produced the graph next to its
//! `threshold`, `nodes` and `edges`.

use deckweaver_domain::SimilarityGraph;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Serialized form of an exported graph
#[derive(Debug, Serialize)]
pub struct GraphDocument<'a> {
    pub commander: &'a str,
    pub tribal_type: &'a str,
    pub node_count: usize,
    pub edge_count: usize,
    #[serde(flatten)]
    pub graph: &'a SimilarityGraph,
}

impl<'a> GraphDocument<'a> {
    pub fn new(commander: &'a str, tribal_type: &'a str, graph: &'a SimilarityGraph) -> Self {
        Self {
            commander,
            tribal_type,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            graph,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the graph document to `path`, replacing any existing file
pub async fn write_graph_json(
    document: &GraphDocument<'_>,
    path: &Path,
) -> Result<(), ExportError> {
    let json = document.to_json()?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
    info!(
        "Wrote similarity graph ({} nodes, {} edges) to {}",
        document.node_count,
        document.edge_count,
        path.display()
    );
    Ok(())
}
