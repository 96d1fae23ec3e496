//! CLI command handling
//!
//! Loads configuration, builds the backend and runner, and prints results.

use colored::Colorize;
use std::path::PathBuf;

use crate::backend;
use crate::commands::Commands;
use crate::common::{Config, Error, Network, Result};
use crate::scenario::{builtin, ConsoleReporter, Runner, Scenario};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            scenario,
            file,
            network,
            config,
            verbose,
            strict,
        } => run(scenario, file, network, config, verbose, strict).await,

        Commands::List => {
            for scenario in builtin::all() {
                println!(
                    "{:<18} {:>3} steps  {}",
                    scenario.name.bold(),
                    scenario.steps.len(),
                    scenario.description.as_deref().unwrap_or("").dimmed()
                );
            }
            Ok(())
        }

        Commands::Show { name } => {
            let scenario = builtin::find(&name).ok_or(Error::UnknownScenario(name))?;
            print!("{}", scenario.to_yaml()?);
            Ok(())
        }
    }
}

async fn run(
    name: String,
    file: Option<PathBuf>,
    network: Option<String>,
    config_path: Option<PathBuf>,
    verbose: bool,
    strict: bool,
) -> Result<()> {
    // Scenario first: a bad file should not cost a backend round-trip
    let scenario = match file {
        Some(path) => Scenario::load(&path)?,
        None => builtin::find(&name).ok_or(Error::UnknownScenario(name))?,
    };

    let mut config = Config::load(config_path.as_deref())?;
    if let Some(network) = network {
        config.network = Network::from(network.as_str());
    }

    let backend = backend::from_config(&config)?;
    let runner = Runner::initialize(&config, backend).await?;

    let mut reporter = ConsoleReporter::new(config.print.clone(), verbose);
    let (_, summary) = runner.run(&scenario, &mut reporter).await;

    if strict && !summary.all_succeeded() {
        return Err(Error::ScenarioFailed {
            failed: summary.failed,
            total: summary.total,
        });
    }
    Ok(())
}
