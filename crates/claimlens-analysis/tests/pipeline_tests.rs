//! End-to-end pipeline tests against mock collaborators and a real store

use claimlens_analysis::{AnalysisConfig, AnalysisPipeline};
use claimlens_domain::traits::ClaimSink;
use claimlens_domain::{Category, Influencer, RawPost, VerificationStatus};
use claimlens_oracle::MockOracle;
use claimlens_source::MockSource;
use claimlens_store::SqliteStore;

fn registered_influencer(store: &mut SqliteStore, name: &str, handle: &str) -> Influencer {
    let influencer = Influencer::new(name, handle, 1_000);
    store.upsert_influencer(&influencer).unwrap();
    influencer
}

#[tokio::test]
async fn test_full_run_with_duplicate_claim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("claimlens.db");

    let mut oracle = MockOracle::new("");
    oracle.add_response(
        "Big sugar thread today",
        "- Sugar causes diabetes.\n- sugar causes diabetes.\n- Exercise improves mood.",
    );
    oracle.add_response("Statement: Sugar causes diabetes.", "Nutrition");
    oracle.add_response("Statement: Exercise improves mood.", "Fitness");
    oracle.add_response(
        "Claim: Sugar causes diabetes.",
        r#"{"status": "Debunked", "confidence": 70}"#,
    );
    oracle.add_response(
        "Claim: Exercise improves mood.",
        r#"{"status": "Verified", "confidence": 90}"#,
    );

    let mut source = MockSource::new();
    source.add_posts(
        "drhealth",
        vec![
            RawPost::new("Big sugar thread today", 100),
            RawPost::new("Workout wisdom", 200),
        ],
    );

    let mut store = SqliteStore::new(&path).unwrap();
    let influencer = registered_influencer(&mut store, "Dr. Health", "drhealth");

    let pipeline = AnalysisPipeline::new(oracle, source, store, AnalysisConfig::default());
    let result = pipeline.run(&influencer).await.unwrap();

    // Three raw claims, one case-insensitive duplicate
    assert_eq!(result.claims_analyzed, 2);
    assert_eq!(result.claims_verified, 1);
    assert_eq!(result.trust_score, 80.0);

    // Reopen the database to check what actually persisted
    let store = SqliteStore::new(&path).unwrap();
    let persisted = store.get_influencer("drhealth").unwrap().unwrap();
    assert_eq!(persisted.trust_score, 80.0);
    assert!(persisted.last_analyzed.is_some());

    let claims = store.claims_for(influencer.id).unwrap();
    assert_eq!(claims.len(), 2);
    assert_eq!(claims[0].text, "Sugar causes diabetes.");
    assert_eq!(claims[0].category, Category::Nutrition);
    assert_eq!(claims[0].status, VerificationStatus::Debunked);
    assert_eq!(claims[0].confidence, 70.0);
    assert_eq!(claims[1].text, "Exercise improves mood.");
    assert_eq!(claims[1].status, VerificationStatus::Verified);
}

#[tokio::test]
async fn test_zero_posts_leaves_trust_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("claimlens.db");

    let mut store = SqliteStore::new(&path).unwrap();
    let mut influencer = registered_influencer(&mut store, "Quiet", "quiet");
    store
        .update_influencer_trust(influencer.id, 33.0, 500)
        .unwrap();
    influencer.trust_score = 33.0;

    let mut source = MockSource::new();
    source.add_posts("quiet", vec![]);

    let pipeline = AnalysisPipeline::new(
        MockOracle::new("unused"),
        source,
        store,
        AnalysisConfig::default(),
    );
    let result = pipeline.run(&influencer).await.unwrap();

    assert_eq!(result.claims_analyzed, 0);
    assert_eq!(result.trust_score, 33.0);

    let store = SqliteStore::new(&path).unwrap();
    let persisted = store.get_influencer("quiet").unwrap().unwrap();
    assert_eq!(persisted.trust_score, 33.0);
    assert_eq!(persisted.last_analyzed, Some(500));
    assert!(store.claims_for(influencer.id).unwrap().is_empty());
}

#[tokio::test]
async fn test_source_outage_is_a_no_op_not_a_failure() {
    let mut source = MockSource::new();
    source.add_posts("drhealth", vec![RawPost::new("text", 0)]);
    source.set_unavailable(true);

    let store = SqliteStore::new(":memory:").unwrap();
    let pipeline = AnalysisPipeline::new(
        MockOracle::new("unused"),
        source,
        store,
        AnalysisConfig::default(),
    );

    let result = pipeline
        .run(&Influencer::new("Dr. Health", "drhealth", 0))
        .await
        .unwrap();
    assert_eq!(result.claims_analyzed, 0);
}

#[tokio::test]
async fn test_failed_extraction_is_a_no_op() {
    let mut oracle = MockOracle::new("");
    oracle.add_error("Big sugar thread today");

    let mut source = MockSource::new();
    source.add_posts("drhealth", vec![RawPost::new("Big sugar thread today", 0)]);

    let store = SqliteStore::new(":memory:").unwrap();
    let pipeline = AnalysisPipeline::new(oracle, source, store, AnalysisConfig::default());

    let result = pipeline
        .run(&Influencer::new("Dr. Health", "drhealth", 0))
        .await
        .unwrap();
    assert_eq!(result.claims_analyzed, 0);
}

#[tokio::test]
async fn test_classification_failures_degrade_to_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("claimlens.db");

    let mut oracle = MockOracle::new("");
    oracle.add_response(
        "Mixed luck today",
        "Kale cures cancer.\nExercise improves mood.",
    );
    // First claim: both classification calls fail
    oracle.add_error("Statement: Kale cures cancer.");
    oracle.add_error("Claim: Kale cures cancer.");
    // Second claim: both succeed
    oracle.add_response("Statement: Exercise improves mood.", "Fitness");
    oracle.add_response(
        "Claim: Exercise improves mood.",
        r#"{"status": "Verified", "confidence": 90}"#,
    );

    let mut source = MockSource::new();
    source.add_posts("drhealth", vec![RawPost::new("Mixed luck today", 0)]);

    let mut store = SqliteStore::new(&path).unwrap();
    let influencer = registered_influencer(&mut store, "Dr. Health", "drhealth");

    let pipeline = AnalysisPipeline::new(oracle, source, store, AnalysisConfig::default());
    let result = pipeline.run(&influencer).await.unwrap();

    // Run completes; the failed claim carries the fallback values
    assert_eq!(result.claims_analyzed, 2);
    assert_eq!(result.claims_verified, 1);
    assert_eq!(result.trust_score, 70.0); // mean of fallback 50 and 90

    let store = SqliteStore::new(&path).unwrap();
    let claims = store.claims_for(influencer.id).unwrap();
    assert_eq!(claims[0].text, "Kale cures cancer.");
    assert_eq!(claims[0].category, Category::Other);
    assert_eq!(claims[0].status, VerificationStatus::Questionable);
    assert_eq!(claims[0].confidence, 50.0);
}

#[tokio::test]
async fn test_prose_wrapped_oracle_output_still_classifies() {
    let mut oracle = MockOracle::new("");
    oracle.add_response("One claim only", "* Kale cures cancer.");
    oracle.add_response(
        "Statement: Kale cures cancer.",
        "I would say this falls under Nutrition.",
    );
    oracle.add_response(
        "Claim: Kale cures cancer.",
        "```json\n{\"status\": \"Debunked\", \"confidence\": 8}\n```",
    );

    let mut source = MockSource::new();
    source.add_posts("drhealth", vec![RawPost::new("One claim only", 0)]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("claimlens.db");
    let mut store = SqliteStore::new(&path).unwrap();
    let influencer = registered_influencer(&mut store, "Dr. Health", "drhealth");

    let pipeline = AnalysisPipeline::new(oracle, source, store, AnalysisConfig::default());
    let result = pipeline.run(&influencer).await.unwrap();
    assert_eq!(result.claims_analyzed, 1);
    assert_eq!(result.trust_score, 8.0);

    let store = SqliteStore::new(&path).unwrap();
    let claims = store.claims_for(influencer.id).unwrap();
    assert_eq!(claims[0].category, Category::Nutrition);
    assert_eq!(claims[0].status, VerificationStatus::Debunked);
}

#[tokio::test]
async fn test_larger_fanout_reassembles_in_dedup_order() {
    let claim_texts: Vec<String> = (0..8).map(|i| format!("Health claim number {}.", i)).collect();

    let mut oracle = MockOracle::new(r#"{"status": "Verified", "confidence": 60}"#);
    oracle.add_response("Long thread", claim_texts.join("\n"));
    for text in &claim_texts {
        oracle.add_response(format!("Statement: {}", text), "Medicine");
    }

    let mut source = MockSource::new();
    source.add_posts("prolific", vec![RawPost::new("Long thread", 0)]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("claimlens.db");
    let mut store = SqliteStore::new(&path).unwrap();
    let influencer = registered_influencer(&mut store, "Prolific", "prolific");

    let config = AnalysisConfig {
        max_concurrent_classifications: 3,
        ..AnalysisConfig::default()
    };
    let pipeline = AnalysisPipeline::new(oracle, source, store, config);
    let result = pipeline.run(&influencer).await.unwrap();

    assert_eq!(result.claims_analyzed, 8);
    assert_eq!(result.claims_verified, 8);
    assert_eq!(result.trust_score, 60.0);

    let store = SqliteStore::new(&path).unwrap();
    let claims = store.claims_for(influencer.id).unwrap();
    let texts: Vec<&str> = claims.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, claim_texts.iter().map(String::as_str).collect::<Vec<_>>());
}
