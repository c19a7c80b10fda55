//! Simulation configuration structures and validation.
//!
//! Configurations use YAML with two sections: `simulation` (trial count,
//! optional seed) and `network` (start/end events plus per-node successor
//! lists with duration descriptors).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::duration::DurationModel;
use crate::network::{ActivityNetwork, NetworkError, NodeId};

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid simulation settings: {0}")]
    InvalidSimulation(String),
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationSettings,
    pub network: NetworkConfig,
}

/// Trial-loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Number of Monte Carlo trials to run
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Master seed; drawn from entropy at startup when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_trials() -> usize {
    10_000
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: None,
        }
    }
}

/// Activity network description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Start event of every path
    pub start: NodeId,
    /// End event of every path
    pub end: NodeId,
    /// Outgoing edges per node, in declaration order
    pub edges: BTreeMap<NodeId, Vec<EdgeConfig>>,
}

/// One outgoing edge of a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Successor event
    pub to: NodeId,
    /// Duration descriptor: `"<number>"` or `"U(low,high)"`
    pub duration: String,
}

impl Config {
    /// Validate the configuration without building the network.
    ///
    /// Checks the trial count, that every duration descriptor parses, and
    /// that the start and end events are actually part of the network.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.simulation.trials == 0 {
            return Err(ValidationError::InvalidSimulation(
                "trials must be at least 1".to_string(),
            ));
        }

        for (from, edges) in &self.network.edges {
            for edge in edges {
                edge.duration.parse::<DurationModel>().map_err(|e| {
                    ValidationError::InvalidNetwork(format!(
                        "edge {}->{}: {}",
                        from, edge.to, e
                    ))
                })?;
            }
        }

        if !self.mentions_node(self.network.start) {
            return Err(ValidationError::InvalidNetwork(format!(
                "start node {} does not appear in the network",
                self.network.start
            )));
        }
        if !self.mentions_node(self.network.end) {
            return Err(ValidationError::InvalidNetwork(format!(
                "end node {} does not appear in the network",
                self.network.end
            )));
        }

        Ok(())
    }

    fn mentions_node(&self, node: NodeId) -> bool {
        self.network.edges.contains_key(&node)
            || self
                .network
                .edges
                .values()
                .flatten()
                .any(|edge| edge.to == node)
    }

    /// Build the immutable activity network described by this configuration
    pub fn build_network(&self) -> Result<ActivityNetwork, NetworkError> {
        let descriptors: BTreeMap<NodeId, Vec<(NodeId, String)>> = self
            .network
            .edges
            .iter()
            .map(|(&from, edges)| {
                (
                    from,
                    edges
                        .iter()
                        .map(|edge| (edge.to, edge.duration.clone()))
                        .collect(),
                )
            })
            .collect();
        ActivityNetwork::from_descriptors(&descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
simulation:
  trials: 5000
  seed: 42
network:
  start: 1
  end: 7
  edges:
    1:
      - { to: 2, duration: "U(3,5)" }
      - { to: 5, duration: "6" }
    2:
      - { to: 3, duration: "6" }
      - { to: 4, duration: "U(7,9)" }
    3:
      - { to: 4, duration: "U(5,8)" }
    4:
      - { to: 7, duration: "4" }
    5:
      - { to: 3, duration: "7" }
      - { to: 4, duration: "9" }
      - { to: 6, duration: "U(7,10)" }
    6:
      - { to: 7, duration: "U(8,12)" }
"#;

    #[test]
    fn test_parse_sample_config() {
        let config: Config = serde_yaml::from_str(SAMPLE_YAML).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.trials, 5000);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.network.start, 1);
        assert_eq!(config.network.end, 7);

        let network = config.build_network().unwrap();
        assert_eq!(network.node_count(), 7);
        assert_eq!(network.edge_count(), 10);
    }

    #[test]
    fn test_simulation_defaults() {
        let yaml = r#"
network:
  start: 1
  end: 2
  edges:
    1:
      - { to: 2, duration: "3" }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.trials, 10_000);
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_zero_trials_rejected() {
        let yaml = r#"
simulation:
  trials: 0
network:
  start: 1
  end: 2
  edges:
    1:
      - { to: 2, duration: "3" }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSimulation(_))
        ));
    }

    #[test]
    fn test_bad_descriptor_rejected() {
        let yaml = r#"
network:
  start: 1
  end: 2
  edges:
    1:
      - { to: 2, duration: "U(9,3)" }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_unknown_endpoints_rejected() {
        let yaml = r#"
network:
  start: 9
  end: 2
  edges:
    1:
      - { to: 2, duration: "3" }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_end_as_terminal_target_is_known() {
        // End node 2 only ever appears as an edge target.
        let yaml = r#"
network:
  start: 1
  end: 2
  edges:
    1:
      - { to: 2, duration: "3" }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
    }
}
