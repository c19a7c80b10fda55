//! Simple-path enumeration.
//!
//! Depth-first search producing every simple path from a start node to an
//! end node. Enumeration runs once per network; its output order is the
//! canonical path order for the rest of the simulation (tie-breaking,
//! sample accumulation, reporting).

use crate::network::{ActivityNetwork, NodeId};

/// An ordered node sequence from start to end with no repeated node
pub type Path = Vec<NodeId>;

/// Canonical string identity of a path: node ids joined by `"->"`.
///
/// This is the stable key reporting and plotting collaborators use; two
/// distinct node sequences never produce the same key.
pub fn path_key(path: &[NodeId]) -> String {
    path.iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join("->")
}

/// Find all simple paths from `start` to `end`.
///
/// Traversal follows each node's outgoing edges in declaration order and
/// skips successors already on the current prefix, which is what bounds
/// recursion on cyclic networks. Reaching `end` emits the prefix and stops;
/// edges leaving `end` are never followed. An unknown or unreachable start
/// yields an empty list, `start == end` yields the single one-node path.
pub fn find_all_simple_paths(
    network: &ActivityNetwork,
    start: NodeId,
    end: NodeId,
) -> Vec<Path> {
    let mut paths = Vec::new();
    if !network.contains(start) {
        return paths;
    }
    let mut prefix = vec![start];
    visit(network, end, &mut prefix, &mut paths);
    paths
}

fn visit(network: &ActivityNetwork, end: NodeId, prefix: &mut Path, paths: &mut Vec<Path>) {
    let current = *prefix.last().unwrap();
    if current == end {
        paths.push(prefix.clone());
        return;
    }
    for edge in network.successors(current) {
        if prefix.contains(&edge.to) {
            continue;
        }
        prefix.push(edge.to);
        visit(network, end, prefix, paths);
        prefix.pop();
    }
}
