//! Statistical reduction of accumulated trial results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::paths::path_key;
use crate::simulate::{AccumulatedResults, SimulationError};

/// Summary statistics for one path across all trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStatistics {
    /// Mean total duration
    pub mean: f64,
    /// Population standard deviation (divide by N, not N-1)
    pub std_dev: f64,
    /// Minimum observed total
    pub min: f64,
    /// Maximum observed total
    pub max: f64,
    /// Percentage of trials in which this path was critical
    pub criticality: f64,
}

/// Reduce accumulated samples and tallies into per-path statistics.
///
/// Pure reduction, no randomness. Every enumerated path must have at least
/// one recorded sample; a path without any indicates an enumerator/simulator
/// mismatch and fails with `MissingPathData` rather than producing NaN
/// statistics.
pub fn aggregate(
    results: &AccumulatedResults,
) -> Result<HashMap<String, PathStatistics>, SimulationError> {
    let mut stats = HashMap::with_capacity(results.paths.len());

    for path in &results.paths {
        let key = path_key(path);
        let samples = results
            .samples
            .get(&key)
            .filter(|sequence| !sequence.is_empty())
            .ok_or_else(|| SimulationError::MissingPathData(key.clone()))?;

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let critical_count = results.critical_counts.get(&key).copied().unwrap_or(0);
        let criticality = critical_count as f64 / results.num_trials as f64 * 100.0;

        stats.insert(
            key,
            PathStatistics {
                mean,
                std_dev: variance.sqrt(),
                min,
                max,
                criticality,
            },
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn results_with(samples: Vec<(&str, Vec<f64>)>, counts: Vec<(&str, usize)>, trials: usize) -> AccumulatedResults {
        let paths = samples
            .iter()
            .map(|(key, _)| {
                key.split("->")
                    .map(|node| node.parse().unwrap())
                    .collect::<Vec<u32>>()
            })
            .collect();
        AccumulatedResults {
            paths,
            samples: samples
                .into_iter()
                .map(|(key, sequence)| (key.to_string(), sequence))
                .collect(),
            critical_counts: counts
                .into_iter()
                .map(|(key, count)| (key.to_string(), count))
                .collect(),
            num_trials: trials,
        }
    }

    #[test]
    fn test_basic_reduction() {
        let results = results_with(
            vec![("1->2", vec![2.0, 4.0, 6.0, 8.0])],
            vec![("1->2", 4)],
            4,
        );
        let stats = aggregate(&results).unwrap();
        let s = &stats["1->2"];
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 8.0);
        assert_eq!(s.criticality, 100.0);
        // Population std dev of {2,4,6,8} is sqrt(5).
        assert!((s.std_dev - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_samples_have_zero_std() {
        let results = results_with(
            vec![("1->2", vec![3.0; 50])],
            vec![("1->2", 50)],
            50,
        );
        let stats = aggregate(&results).unwrap();
        assert_eq!(stats["1->2"].std_dev, 0.0);
        assert_eq!(stats["1->2"].min, stats["1->2"].max);
    }

    #[test]
    fn test_missing_samples_fail() {
        let mut results = results_with(
            vec![("1->2", vec![1.0])],
            vec![("1->2", 1)],
            1,
        );
        results.paths.push(vec![1, 3]);
        assert_eq!(
            aggregate(&results),
            Err(SimulationError::MissingPathData("1->3".to_string()))
        );
    }

    #[test]
    fn test_empty_sample_sequence_fails() {
        let results = results_with(
            vec![("1->2", vec![])],
            vec![("1->2", 0)],
            1,
        );
        assert!(matches!(
            aggregate(&results),
            Err(SimulationError::MissingPathData(_))
        ));
    }

    #[test]
    fn test_no_paths_is_empty_not_error() {
        let results = AccumulatedResults {
            paths: Vec::new(),
            samples: HashMap::new(),
            critical_counts: HashMap::new(),
            num_trials: 10,
        };
        assert!(aggregate(&results).unwrap().is_empty());
    }
}
