use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rand::Rng;
use std::path::PathBuf;

mod config;
mod config_loader;
mod duration;
mod network;
mod paths;
mod report;
mod simulate;
mod stats;
mod trial;

use config_loader::CliOverrides;
use simulate::simulate_and_aggregate;

/// Monte Carlo criticality analysis for stochastic PERT/CPM activity networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Override the number of trials from the configuration
    #[arg(long)]
    trials: Option<usize>,

    /// Override the master seed (runs are reproducible for a given seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON report (statistics plus raw samples) to this path
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Print an ASCII histogram of each path's sampled durations
    #[arg(long)]
    histogram: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting pertsim");
    info!("Configuration file: {:?}", args.config);

    let mut config = config_loader::load_config(&args.config)?;
    let overrides = CliOverrides {
        trials: args.trials,
        seed: args.seed,
    };
    config_loader::apply_overrides(&mut config, &overrides)?;

    let seed = config.simulation.seed.unwrap_or_else(|| {
        let seed = rand::thread_rng().gen();
        info!("No seed configured, drew {} (pass --seed to replay)", seed);
        seed
    });

    let network = config.build_network()?;
    info!(
        "Built activity network: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );

    let num_trials = config.simulation.trials;
    let (path_stats, samples) = simulate_and_aggregate(
        &network,
        config.network.start,
        config.network.end,
        num_trials,
        seed,
    )?;

    report::print_summary(&path_stats, num_trials);
    if args.histogram {
        report::print_histograms(&path_stats, &samples);
    }
    report::print_criticality_chart(&path_stats);

    if let Some(report_path) = &args.report {
        report::generate_json_report(&path_stats, &samples, num_trials, report_path)?;
    }

    info!("Simulation completed successfully");
    Ok(())
}
