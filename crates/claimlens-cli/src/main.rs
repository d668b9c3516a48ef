//! Claimlens CLI - analyze health influencers' claims from the command line.

mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::{Cli, Command};
use config::CliConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Add(args) => commands::execute_add(args, &config),
        Command::Analyze(args) => commands::execute_analyze(args, &config).await,
        Command::Leaderboard => commands::execute_leaderboard(&config),
        Command::Claims(args) => commands::execute_claims(args, &config),
    }
}
