//! Command-line argument definitions

use clap::{Args, Parser, Subcommand};

/// Analyze health influencers: extract, verify, and score their claims
#[derive(Debug, Parser)]
#[command(name = "claimlens", version, about)]
pub struct Cli {
    /// Path to a claimlens.toml config file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register an influencer, or update an existing one's name and followers
    Add(AddArgs),

    /// Run the analysis pipeline for an influencer
    Analyze(AnalyzeArgs),

    /// Show all influencers ordered by trust score
    Leaderboard,

    /// Show the stored claims for an influencer
    Claims(ClaimsArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Unique handle on the upstream platform
    pub handle: String,

    /// Display name (defaults to the handle)
    #[arg(long)]
    pub name: Option<String>,

    /// Follower count
    #[arg(long, default_value_t = 0)]
    pub followers: u64,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Handle of a registered influencer
    pub handle: String,

    /// Run against built-in mock collaborators instead of live services
    #[arg(long)]
    pub mock: bool,
}

#[derive(Debug, Args)]
pub struct ClaimsArgs {
    /// Handle of a registered influencer
    pub handle: String,
}
