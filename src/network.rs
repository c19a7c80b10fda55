//! Activity network representation.
//!
//! A directed graph of events (nodes) and activities (edges), each edge
//! carrying a duration model. The network is built once from textual
//! descriptors and is immutable afterwards.

use std::collections::BTreeMap;

use crate::duration::{DurationModel, ParseError};

/// Identifier for an event node, unique within a network
pub type NodeId = u32;

/// Errors that can occur while constructing an activity network
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    #[error("edge {from}->{to}: {source}")]
    Duration {
        from: NodeId,
        to: NodeId,
        #[source]
        source: ParseError,
    },

    #[error("parallel edge {from}->{to} is not supported")]
    ParallelEdge { from: NodeId, to: NodeId },
}

/// A directed activity between two events
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub duration: DurationModel,
}

/// Directed activity network.
///
/// Adjacency maps every known node to its outgoing edges in declaration
/// order. Terminal nodes are present with an empty successor list, so
/// `contains` answers for every node an edge references. Node iteration is
/// in ascending id order, which gives the rest of the system a stable edge
/// order to rely on.
#[derive(Debug, Clone)]
pub struct ActivityNetwork {
    adjacency: BTreeMap<NodeId, Vec<Edge>>,
}

impl ActivityNetwork {
    /// Build a network from per-node successor lists with textual duration
    /// descriptors (`"<number>"` or `"U(low,high)"`).
    ///
    /// Fails on the first malformed descriptor or duplicate ordered pair;
    /// no partial network is returned.
    pub fn from_descriptors(
        descriptors: &BTreeMap<NodeId, Vec<(NodeId, String)>>,
    ) -> Result<Self, NetworkError> {
        let mut adjacency: BTreeMap<NodeId, Vec<Edge>> = BTreeMap::new();

        for (&from, successors) in descriptors {
            let entry = adjacency.entry(from).or_default();
            for (to, descriptor) in successors {
                if entry.iter().any(|edge| edge.to == *to) {
                    return Err(NetworkError::ParallelEdge { from, to: *to });
                }
                let duration: DurationModel = descriptor
                    .parse()
                    .map_err(|source| NetworkError::Duration { from, to: *to, source })?;
                entry.push(Edge { from, to: *to, duration });
            }
        }

        // Every referenced target is a known node, terminal or not.
        let targets: Vec<NodeId> = adjacency
            .values()
            .flatten()
            .map(|edge| edge.to)
            .collect();
        for target in targets {
            adjacency.entry(target).or_default();
        }

        Ok(ActivityNetwork { adjacency })
    }

    /// Returns true if the node is part of the network
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Outgoing edges of a node in declaration order (empty for terminals
    /// and unknown nodes)
    pub fn successors(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The edge between an ordered node pair, if one exists
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.successors(from).iter().find(|edge| edge.to == to)
    }

    /// All edges in deterministic order (ascending source id, then
    /// declaration order)
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.adjacency.values().flatten()
    }

    /// Number of known nodes, terminals included
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
