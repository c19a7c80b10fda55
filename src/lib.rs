//! # Pertsim - Monte Carlo criticality analysis for activity networks
//!
//! This library estimates, by repeated random sampling, the duration
//! statistics and criticality probability of every simple path through a
//! PERT/CPM-style activity network whose edge durations are either fixed or
//! drawn from a uniform distribution.
//!
//! ## Overview
//!
//! A network is built once from textual duration descriptors, its simple
//! paths are enumerated once, and then N independent trials each sample one
//! concrete duration per edge and pick the trial's critical (longest) path.
//! The accumulated samples reduce to per-path mean, standard deviation,
//! min/max, and the empirical probability of being critical.
//!
//! ## Architecture
//!
//! - `duration`: fixed/uniform duration models and descriptor parsing
//! - `network`: the immutable activity-network data structure
//! - `paths`: simple-path enumeration and the canonical path key
//! - `trial`: single-trial sampling with a per-trial edge cache
//! - `simulate`: the parallel Monte Carlo loop and result accumulation
//! - `stats`: reduction of accumulated samples into path statistics
//! - `config` / `config_loader`: YAML configuration and loading
//! - `report`: console summary, ASCII charts, and JSON report output
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use pertsim::network::ActivityNetwork;
//! use pertsim::simulate::simulate_and_aggregate;
//!
//! let mut edges: BTreeMap<u32, Vec<(u32, String)>> = BTreeMap::new();
//! edges.insert(1, vec![(2, "U(3,5)".to_string()), (3, "6".to_string())]);
//! edges.insert(2, vec![(3, "2".to_string())]);
//!
//! let network = ActivityNetwork::from_descriptors(&edges)?;
//! let (stats, samples) = simulate_and_aggregate(&network, 1, 3, 10_000, 42)?;
//!
//! for (path, stat) in &stats {
//!     println!("{}: mean {:.2}, critical {:.1}%", path, stat.mean, stat.criticality);
//! }
//! # let _ = samples;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library errors are typed `thiserror` enums (`ParseError`, `NetworkError`,
//! `ValidationError`, `SimulationError`); the binary boundary wraps them in
//! `color_eyre` reports with context.

pub mod config;
pub mod config_loader;
pub mod duration;
pub mod network;
pub mod paths;
pub mod report;
pub mod simulate;
pub mod stats;
pub mod trial;

pub use duration::{DurationModel, ParseError};
pub use network::{ActivityNetwork, Edge, NetworkError, NodeId};
pub use paths::{find_all_simple_paths, path_key, Path};
pub use simulate::{simulate, simulate_and_aggregate, AccumulatedResults, SimulationError};
pub use stats::{aggregate, PathStatistics};
