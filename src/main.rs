//! Egg Wisdom scenario runner
//!
//! Replays scripted transactions and queries against the Egg Wisdom
//! contract and prints one status line per step.

use clap::Parser;
use eggwisdom::commands::Commands;
use eggwisdom::{cli, common::logging};

#[derive(Parser)]
#[command(name = "eggwisdom", about = "Run Egg Wisdom contract scenarios")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Run { verbose: true, .. }) {
        logging::init_verbose();
    } else {
        logging::init_cli();
    }

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
