//! Single-trial execution.
//!
//! One trial samples a concrete duration for every edge of the network and
//! derives each path's total plus the trial's critical path. An edge has one
//! real duration per trial, so its sample is drawn once and reused by every
//! path that traverses it; re-sampling per path would decorrelate paths that
//! share activities.

use std::collections::HashMap;

use rand::Rng;

use crate::network::{ActivityNetwork, NodeId};
use crate::paths::Path;

/// Outcome of one trial, aligned with the enumerated path order
#[derive(Debug, Clone)]
pub struct TrialSample {
    /// Total sampled duration per path, in path order
    pub durations: Vec<f64>,
    /// Index of the critical path, `None` when there are no paths
    pub critical: Option<usize>,
}

/// Run one trial over the enumerated paths.
///
/// Every edge of the network is sampled exactly once, in the network's
/// deterministic edge order, so a given rng stream always produces the same
/// trial regardless of how many paths share an edge. The critical path is
/// the one with the maximum total; ties go to the earliest path in
/// enumeration order.
pub fn run_trial<R: Rng + ?Sized>(
    network: &ActivityNetwork,
    paths: &[Path],
    rng: &mut R,
) -> TrialSample {
    let mut edge_durations: HashMap<(NodeId, NodeId), f64> =
        HashMap::with_capacity(network.edge_count());
    for edge in network.edges() {
        edge_durations.insert((edge.from, edge.to), edge.duration.sample(rng));
    }

    let mut durations = Vec::with_capacity(paths.len());
    let mut critical: Option<usize> = None;
    for (index, path) in paths.iter().enumerate() {
        let total: f64 = path
            .windows(2)
            .map(|pair| edge_durations[&(pair[0], pair[1])])
            .sum();
        // Strict comparison keeps the first of equal totals critical.
        if critical.map_or(true, |best| total > durations[best]) {
            critical = Some(index);
        }
        durations.push(total);
    }

    TrialSample { durations, critical }
}
