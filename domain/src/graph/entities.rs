//! Similarity graph entities
//!
//! The graph is undirected with no self-loops or parallel edges. Nodes and
//! edges keep insertion order, so every traversal is deterministic.
//! The serialized form (`threshold`, `nodes`, `edges`) is what external
//! visualizers consume.

use crate::card::{CardId, ColorSet};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Graph node: one candidate card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: CardId,
    pub name: String,
    pub colors: ColorSet,
    pub type_line: String,
}

/// Undirected weighted edge, as exported
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: CardId,
    pub target: CardId,
    pub weight: f64,
}

/// Undirected weighted graph over the candidate pool
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    threshold: f64,
    graph: UnGraph<GraphNode, f64>,
    id_to_node: HashMap<CardId, NodeIndex>,
}

impl SimilarityGraph {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Add a node; returns `false` if the id is already present.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.id_to_node.contains_key(&node.id) {
            return false;
        }
        let id = node.id.clone();
        let ix = self.graph.add_node(node);
        self.id_to_node.insert(id, ix);
        true
    }

    /// Add an undirected edge between two existing nodes.
    ///
    /// Returns `false` for self-loops, unknown endpoints and pairs that are
    /// already connected.
    pub fn add_edge(&mut self, a: &CardId, b: &CardId, weight: f64) -> bool {
        if a == b {
            return false;
        }
        let (Some(&ia), Some(&ib)) = (self.id_to_node.get(a), self.id_to_node.get(b)) else {
            return false;
        };
        if self.graph.find_edge(ia, ib).is_some() {
            return false;
        }
        self.graph.add_edge(ia, ib, weight);
        true
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |ix| &self.graph[ix])
    }

    /// Edges in insertion order, endpoints as they were added
    pub fn edges(&self) -> Vec<GraphEdge> {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| GraphEdge {
                source: self.graph[edge.source()].id.clone(),
                target: self.graph[edge.target()].id.clone(),
                weight: edge.weight,
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.id_to_node.contains_key(id)
    }

    pub fn node(&self, id: &CardId) -> Option<&GraphNode> {
        self.id_to_node.get(id).map(|&ix| &self.graph[ix])
    }

    /// Number of incident edges; 0 for unknown ids
    pub fn degree(&self, id: &CardId) -> usize {
        self.id_to_node
            .get(id)
            .map(|&ix| self.graph.edges(ix).count())
            .unwrap_or(0)
    }

    /// Sum of incident edge weights; 0 for unknown ids
    pub fn weighted_degree(&self, id: &CardId) -> f64 {
        self.id_to_node
            .get(id)
            .map(|&ix| self.graph.edges(ix).map(|e| *e.weight()).sum())
            .unwrap_or(0.0)
    }

    pub fn edge_weight(&self, a: &CardId, b: &CardId) -> Option<f64> {
        let (&ia, &ib) = (self.id_to_node.get(a)?, self.id_to_node.get(b)?);
        self.graph.find_edge(ia, ib).map(|e| self.graph[e])
    }

    /// Neighbors with edge weights, strongest first (ties by ascending id)
    pub fn neighbors(&self, id: &CardId) -> Vec<(&GraphNode, f64)> {
        let Some(&ix) = self.id_to_node.get(id) else {
            return Vec::new();
        };
        let mut neighbors: Vec<(&GraphNode, f64)> = self
            .graph
            .edges(ix)
            .map(|e| {
                let other = if e.source() == ix { e.target() } else { e.source() };
                (&self.graph[other], *e.weight())
            })
            .collect();
        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
        neighbors
    }

    /// The `n` nodes with the highest weighted degree (ties by ascending id)
    pub fn most_central(&self, n: usize) -> Vec<(&GraphNode, f64)> {
        let mut ranked: Vec<(&GraphNode, f64)> = self
            .graph
            .node_indices()
            .map(|ix| {
                let node = &self.graph[ix];
                (node, self.weighted_degree(&node.id))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
        ranked.truncate(n);
        ranked
    }
}

/// Exported as `{threshold, nodes, edges}`; the petgraph internals stay private.
impl Serialize for SimilarityGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<&GraphNode> = self.nodes().collect();
        let mut state = serializer.serialize_struct("SimilarityGraph", 3)?;
        state.serialize_field("threshold", &self.threshold)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &self.edges())?;
        state.end()
    }
}
