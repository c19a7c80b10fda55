//! Report generation for simulation results.
//!
//! Produces the console summary, ASCII charts over the raw samples, and a
//! JSON report for external plotting tools.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::stats::PathStatistics;

const HISTOGRAM_BINS: usize = 30;
const CHART_WIDTH: usize = 50;

/// Per-path entry of the JSON report
#[derive(Debug, Serialize)]
struct PathReport<'a> {
    stats: &'a PathStatistics,
    /// Raw per-trial totals in trial order, histogram renderer input
    samples: &'a [f64],
}

/// Full JSON report
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    num_trials: usize,
    paths: BTreeMap<&'a str, PathReport<'a>>,
}

/// Write a JSON report with per-path statistics and raw samples
pub fn generate_json_report(
    stats: &HashMap<String, PathStatistics>,
    samples: &HashMap<String, Vec<f64>>,
    num_trials: usize,
    output_path: &Path,
) -> Result<()> {
    let report = JsonReport {
        num_trials,
        paths: stats
            .iter()
            .map(|(key, path_stats)| {
                let sequence = samples.get(key).map(Vec::as_slice).unwrap_or(&[]);
                (
                    key.as_str(),
                    PathReport {
                        stats: path_stats,
                        samples: sequence,
                    },
                )
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize report to JSON")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Paths ordered by mean duration, longest first
pub fn sorted_by_mean(
    stats: &HashMap<String, PathStatistics>,
) -> Vec<(&String, &PathStatistics)> {
    let mut entries: Vec<_> = stats.iter().collect();
    entries.sort_by(|a, b| {
        b.1.mean
            .partial_cmp(&a.1.mean)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    entries
}

/// Print the per-path summary table
pub fn print_summary(stats: &HashMap<String, PathStatistics>, num_trials: usize) {
    println!("\nPath Analysis Results ({} trials):", num_trials);
    if stats.is_empty() {
        println!("  No paths between the requested start and end nodes.");
        return;
    }
    for (key, stat) in sorted_by_mean(stats) {
        println!("Path {}:", key);
        println!("  Mean time: {:.2}", stat.mean);
        println!("  Standard deviation: {:.2}", stat.std_dev);
        println!("  Min/Max time: {:.2}/{:.2}", stat.min, stat.max);
        println!("  Critical path probability: {:.2}%", stat.criticality);
        println!();
    }
}

/// Print an ASCII histogram of each path's sampled totals
pub fn print_histograms(
    stats: &HashMap<String, PathStatistics>,
    samples: &HashMap<String, Vec<f64>>,
) {
    for (key, _) in sorted_by_mean(stats) {
        let Some(sequence) = samples.get(key) else {
            continue;
        };
        println!("Execution time distribution for {}:", key);
        for line in histogram_lines(sequence, HISTOGRAM_BINS) {
            println!("  {}", line);
        }
        println!();
    }
}

/// Print criticality probabilities as a horizontal bar chart
pub fn print_criticality_chart(stats: &HashMap<String, PathStatistics>) {
    if stats.is_empty() {
        return;
    }
    println!("Probability of each path being critical:");
    let entries = sorted_by_mean(stats);
    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, stat) in entries {
        let filled = (stat.criticality / 100.0 * CHART_WIDTH as f64).round() as usize;
        println!(
            "  {:width$}  {:>6.2}% |{}",
            key,
            stat.criticality,
            "#".repeat(filled.min(CHART_WIDTH)),
            width = width
        );
    }
    println!();
}

/// Render one histogram as text lines, one per non-empty bin
fn histogram_lines(samples: &[f64], bins: usize) -> Vec<String> {
    if samples.is_empty() {
        return vec!["(no samples)".to_string()];
    }
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return vec![format!("{:8.2} |{} ({})", min, "#".repeat(CHART_WIDTH), samples.len())];
    }

    let bin_width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in samples {
        let mut bin = ((value - min) / bin_width) as usize;
        if bin >= bins {
            bin = bins - 1;
        }
        counts[bin] += 1;
    }

    let peak = counts.iter().copied().max().unwrap_or(1).max(1);
    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(bin, count)| {
            let low = min + bin as f64 * bin_width;
            let filled = (count * CHART_WIDTH).div_ceil(peak);
            format!("{:8.2} |{} ({})", low, "#".repeat(filled), count)
        })
        .collect()
}
