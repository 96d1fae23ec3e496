//! CLI command definitions
//!
//! Defines the clap commands for the scenario runner.

use clap::Subcommand;
use std::path::PathBuf;

use crate::scenario::builtin::DEFAULT_SCENARIO;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scenario against the configured network
    Run {
        /// Built-in scenario name
        #[arg(default_value = DEFAULT_SCENARIO, conflicts_with = "file")]
        scenario: String,

        /// Path to a YAML scenario file instead of a built-in scenario
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Network to run against (emulator, testnet, mainnet, ...)
        #[arg(long)]
        network: Option<String>,

        /// Configuration file (default: platform config directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print arguments, identities, timings and debug logs
        #[arg(long, short)]
        verbose: bool,

        /// Exit non-zero if any step failed
        #[arg(long)]
        strict: bool,
    },

    /// List built-in scenarios
    List,

    /// Print a built-in scenario as YAML
    Show {
        /// Scenario name
        name: String,
    },
}
