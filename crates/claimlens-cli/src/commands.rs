//! Subcommand implementations

use crate::cli::{AddArgs, AnalyzeArgs, ClaimsArgs};
use crate::config::{CliConfig, ORACLE_KEY_VAR, SOURCE_TOKEN_VAR};
use anyhow::{bail, Context};
use chrono::DateTime;
use claimlens_analysis::AnalysisPipeline;
use claimlens_domain::traits::{PostSource, TextOracle};
use claimlens_domain::{AnalysisResult, Influencer, RawPost};
use claimlens_oracle::{ChatOracle, MockOracle};
use claimlens_source::{MockSource, TwitterSource};
use claimlens_store::SqliteStore;
use colored::Colorize;
use std::fmt;
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub fn execute_add(args: AddArgs, config: &CliConfig) -> anyhow::Result<()> {
    let mut store = SqliteStore::new(&config.db_path)?;

    let name = args.name.unwrap_or_else(|| args.handle.clone());
    let influencer = Influencer::new(name, args.handle, args.followers);
    store.upsert_influencer(&influencer)?;

    println!("Registered @{}", influencer.handle);
    Ok(())
}

pub async fn execute_analyze(args: AnalyzeArgs, config: &CliConfig) -> anyhow::Result<()> {
    let influencer = lookup_influencer(config, &args.handle)?;

    let result = if args.mock {
        println!("{}", "Running with mock collaborators (dry run)".yellow());
        run_for(demo_oracle(), demo_source(&args.handle), config, &influencer).await?
    } else {
        let api_key = CliConfig::env_secret(ORACLE_KEY_VAR)?;
        let bearer_token = CliConfig::env_secret(SOURCE_TOKEN_VAR)?;

        let oracle = ChatOracle::new(
            config.oracle.endpoint.as_str(),
            config.oracle.model.as_str(),
            api_key,
        )?;
        let source = TwitterSource::new(bearer_token)?;

        run_for(oracle, source, config, &influencer).await?
    };

    print_result(&influencer, &result);
    Ok(())
}

pub fn execute_leaderboard(config: &CliConfig) -> anyhow::Result<()> {
    let store = SqliteStore::new(&config.db_path)?;
    let influencers = store.list_influencers()?;

    if influencers.is_empty() {
        println!("No influencers registered yet. Start with: claimlens add <handle>");
        return Ok(());
    }

    let rows: Vec<LeaderboardRow> = influencers
        .iter()
        .enumerate()
        .map(|(idx, influencer)| LeaderboardRow {
            rank: idx + 1,
            name: influencer.name.clone(),
            handle: format!("@{}", influencer.handle),
            followers: influencer.follower_count,
            trust: format!("{:.1}", influencer.trust_score),
            last_analyzed: format_timestamp(influencer.last_analyzed),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}

pub fn execute_claims(args: ClaimsArgs, config: &CliConfig) -> anyhow::Result<()> {
    let store = SqliteStore::new(&config.db_path)?;
    let influencer = lookup_influencer(config, &args.handle)?;

    let claims = store.claims_for(influencer.id)?;
    if claims.is_empty() {
        println!(
            "No claims stored for @{}. Run: claimlens analyze {}",
            args.handle, args.handle
        );
        return Ok(());
    }

    let rows: Vec<ClaimRow> = claims
        .iter()
        .map(|claim| ClaimRow {
            claim: claim.text.clone(),
            category: claim.category.to_string(),
            status: claim.status.to_string(),
            confidence: format!("{:.1}", claim.confidence),
            collected: format_timestamp(Some(claim.collected_at)),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}

fn lookup_influencer(config: &CliConfig, handle: &str) -> anyhow::Result<Influencer> {
    let store = SqliteStore::new(&config.db_path)?;
    match store.get_influencer(handle)? {
        Some(influencer) => Ok(influencer),
        None => bail!(
            "@{} is not registered; run `claimlens add {}` first",
            handle,
            handle
        ),
    }
}

async fn run_for<O, P>(
    oracle: O,
    source: P,
    config: &CliConfig,
    influencer: &Influencer,
) -> anyhow::Result<AnalysisResult>
where
    O: TextOracle + Send + Sync + 'static,
    P: PostSource + Send + Sync + 'static,
    O::Error: fmt::Display,
    P::Error: fmt::Display,
{
    let sink = SqliteStore::new(&config.db_path)?;
    let pipeline = AnalysisPipeline::new(oracle, source, sink, config.analysis.clone());
    pipeline
        .run(influencer)
        .await
        .context("analysis run failed")
}

fn print_result(influencer: &Influencer, result: &AnalysisResult) {
    if result.claims_analyzed == 0 {
        println!("No health claims found for @{}.", influencer.handle);
        return;
    }

    let trust = format!("{:.1}", result.trust_score);
    let trust = if result.trust_score >= 70.0 {
        trust.green()
    } else if result.trust_score >= 40.0 {
        trust.yellow()
    } else {
        trust.red()
    };

    println!(
        "Analyzed {} claims for @{} ({} verified). Trust score: {}",
        result.claims_analyzed, influencer.handle, result.claims_verified, trust
    );
}

fn format_timestamp(secs: Option<u64>) -> String {
    secs.and_then(|s| DateTime::from_timestamp(s as i64, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Built-in demo oracle for `analyze --mock`
fn demo_oracle() -> MockOracle {
    let mut oracle = MockOracle::new("");
    oracle.add_response(
        "Morning thread",
        "- Sugar causes diabetes.\n- Daily walks improve mood.",
    );
    oracle.add_response("Statement: Sugar causes diabetes.", "Nutrition");
    oracle.add_response(
        "Claim: Sugar causes diabetes.",
        r#"{"status": "Questionable", "confidence": 35}"#,
    );
    oracle.add_response("Statement: Daily walks improve mood.", "Mental Health");
    oracle.add_response(
        "Claim: Daily walks improve mood.",
        r#"{"status": "Verified", "confidence": 88}"#,
    );
    oracle
}

/// Built-in demo posts for `analyze --mock`
fn demo_source(handle: &str) -> MockSource {
    let mut source = MockSource::new();
    source.add_posts(
        handle,
        vec![
            RawPost::new("Morning thread: cut sugar, fix everything.", 1_700_000_000),
            RawPost::new("Reminder that daily walks improve mood!", 1_700_000_100),
        ],
    );
    source
}

#[derive(Tabled)]
struct LeaderboardRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Handle")]
    handle: String,
    #[tabled(rename = "Followers")]
    followers: u64,
    #[tabled(rename = "Trust")]
    trust: String,
    #[tabled(rename = "Last analyzed")]
    last_analyzed: String,
}

#[derive(Tabled)]
struct ClaimRow {
    #[tabled(rename = "Claim")]
    claim: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Collected")]
    collected: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some(0)), "1970-01-01 00:00");
    }

    #[tokio::test]
    async fn test_mock_analyze_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cli.db");

        let config = CliConfig {
            db_path: db_path.to_string_lossy().into_owned(),
            ..CliConfig::default()
        };

        let mut store = SqliteStore::new(&config.db_path).unwrap();
        let influencer = Influencer::new("Dr. Health", "drhealth", 500);
        store.upsert_influencer(&influencer).unwrap();
        drop(store);

        let result = run_for(demo_oracle(), demo_source("drhealth"), &config, &influencer)
            .await
            .unwrap();

        assert_eq!(result.claims_analyzed, 2);
        assert_eq!(result.claims_verified, 1);
        assert_eq!(result.trust_score, 61.5);
    }
}
