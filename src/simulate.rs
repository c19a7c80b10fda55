//! Monte Carlo simulation loop.
//!
//! Runs N independent trials over an activity network and accumulates each
//! path's sample sequence plus a tally of how often it was critical. Trials
//! are embarrassingly parallel: every trial derives its own ChaCha8 stream
//! from the master seed and its trial index, and per-trial results are
//! folded in index order, so a run is bit-identical for any thread count.

use std::collections::HashMap;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::network::{ActivityNetwork, NodeId};
use crate::paths::{find_all_simple_paths, path_key, Path};
use crate::stats::{aggregate, PathStatistics};
use crate::trial::run_trial;

/// Errors that can occur while running or aggregating a simulation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no samples recorded for path {0}")]
    MissingPathData(String),
}

/// Everything accumulated across the trials of one simulation run.
///
/// Built incrementally, one trial at a time; read as final only after the
/// full run completes.
#[derive(Debug, Clone)]
pub struct AccumulatedResults {
    /// Enumerated paths in canonical (enumeration) order
    pub paths: Vec<Path>,
    /// Per-path sampled totals, one entry per trial in trial order
    pub samples: HashMap<String, Vec<f64>>,
    /// Per-path count of trials in which the path was critical
    pub critical_counts: HashMap<String, usize>,
    /// Number of trials that were run
    pub num_trials: usize,
}

/// Run `num_trials` independent trials from `start` to `end`.
///
/// Path enumeration happens once up front and its result is reused by every
/// trial. A network where `end` is unreachable from `start` is not an
/// error: the result simply carries zero paths. `num_trials` must be at
/// least 1 and both endpoints must be known nodes.
pub fn simulate(
    network: &ActivityNetwork,
    start: NodeId,
    end: NodeId,
    num_trials: usize,
    seed: u64,
) -> Result<AccumulatedResults, SimulationError> {
    if num_trials == 0 {
        return Err(SimulationError::InvalidArgument(
            "number of trials must be at least 1".to_string(),
        ));
    }
    if !network.contains(start) {
        return Err(SimulationError::InvalidArgument(format!(
            "unknown start node {}",
            start
        )));
    }
    if !network.contains(end) {
        return Err(SimulationError::InvalidArgument(format!(
            "unknown end node {}",
            end
        )));
    }

    let paths = find_all_simple_paths(network, start, end);
    info!(
        "Enumerated {} path(s) from {} to {}",
        paths.len(),
        start,
        end
    );

    if paths.is_empty() {
        info!("No paths to simulate; returning empty results");
        return Ok(AccumulatedResults {
            paths,
            samples: HashMap::new(),
            critical_counts: HashMap::new(),
            num_trials,
        });
    }

    debug!("Running {} trials with seed {}", num_trials, seed);
    let trials: Vec<_> = (0..num_trials)
        .into_par_iter()
        .map(|index| {
            let mut rng = trial_rng(seed, index);
            run_trial(network, &paths, &mut rng)
        })
        .collect();

    // Fold per-trial results in trial-index order.
    let mut per_path: Vec<Vec<f64>> = vec![Vec::with_capacity(num_trials); paths.len()];
    let mut tallies: Vec<usize> = vec![0; paths.len()];
    for trial in trials {
        for (sequence, duration) in per_path.iter_mut().zip(&trial.durations) {
            sequence.push(*duration);
        }
        if let Some(critical) = trial.critical {
            tallies[critical] += 1;
        }
    }

    let keys: Vec<String> = paths.iter().map(|path| path_key(path)).collect();
    let samples = keys.iter().cloned().zip(per_path).collect();
    let critical_counts = keys.into_iter().zip(tallies).collect();

    Ok(AccumulatedResults {
        paths,
        samples,
        critical_counts,
        num_trials,
    })
}

/// Run a full simulation and reduce it to per-path statistics.
///
/// Returns the statistics map for tabular reporting and the raw per-trial
/// sample sequences (in trial order) for histogram rendering.
pub fn simulate_and_aggregate(
    network: &ActivityNetwork,
    start: NodeId,
    end: NodeId,
    num_trials: usize,
    seed: u64,
) -> Result<(HashMap<String, PathStatistics>, HashMap<String, Vec<f64>>), SimulationError> {
    let results = simulate(network, start, end, num_trials, seed)?;
    let stats = aggregate(&results)?;
    Ok((stats, results.samples))
}

/// Derive the independent random stream for one trial.
///
/// Mixing the index with an odd multiplier keeps neighboring trial seeds
/// far apart in the seed space (same scheme as the per-node key derivation
/// in deterministic network simulators).
fn trial_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mixed = seed ^ (index as u64).wrapping_mul(0x517c_c1b7_2722_0a95);
    ChaCha8Rng::seed_from_u64(mixed)
}
