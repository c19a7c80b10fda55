//! Configuration file loading.

use std::fs::File;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;

use crate::config::Config;

/// Load and parse a simulation configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file {:?}", config_path))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file {:?}", config_path))?;

    config.validate()?;

    info!(
        "Loaded network with {} node entries, start {} end {}",
        config.network.edges.len(),
        config.network.start,
        config.network.end
    );
    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub trials: Option<usize>,
    pub seed: Option<u64>,
}

/// Apply CLI overrides to a loaded configuration and re-validate
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(trials) = overrides.trials {
        info!("Overriding trial count: {}", trials);
        config.simulation.trials = trials;
    }
    if let Some(seed) = overrides.seed {
        info!("Overriding seed: {}", seed);
        config.simulation.seed = Some(seed);
    }

    config.validate()?;
    Ok(())
}
