//! Engine binary for the Clout simulation.
//!
//! Loads configuration, seeds a world, runs it for the configured number of
//! weeks, and optionally writes the final world state as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$CLOUT_CONFIG` or `clout-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the world from the configured seed
//! 4. Run the tick loop
//! 5. Log the final standings and export the state

mod error;
mod export;
mod runner;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use clout_core::{Simulation, SimulationConfig};

use crate::error::EngineError;
use crate::runner::LogCallback;

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "CLOUT_CONFIG";

/// Configuration file used when [`CONFIG_ENV`] is unset.
const DEFAULT_CONFIG_PATH: &str = "clout-config.yaml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.engine.log_level)),
        )
        .with_target(true)
        .init();

    info!("clout-engine starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration file read"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        world_name = %config.world.name,
        seed = config.world.seed,
        initial_agents = config.world.initial_agents,
        max_ticks = config.engine.max_ticks,
        "Configuration loaded"
    );

    // 3. Seed the world.
    let max_ticks = config.engine.max_ticks;
    let state_output = config.engine.state_output.clone();
    let mut sim = Simulation::from_config(config)?;

    // 4. Run.
    let result = runner::run_simulation(&mut sim, max_ticks, &mut LogCallback)?;

    // 5. Report and export.
    runner::log_simulation_end(&result);
    if let Some(path) = state_output {
        export::write_state(sim.state(), &path)?;
        info!(path = %path.display(), "World state exported");
    }

    info!(total_ticks = result.total_ticks, "clout-engine shutdown complete");
    Ok(())
}

/// Load the simulation configuration.
///
/// Reads the file named by `$CLOUT_CONFIG`, else `clout-config.yaml` in the
/// working directory. A missing default file falls back to built-in
/// defaults; a missing file named explicitly is an error.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        let config = SimulationConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }
    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        Ok((SimulationConfig::default(), None))
    }
}
