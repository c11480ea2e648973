//! Janitor sweeps against the file-backed stores

use chrono::{Duration, TimeZone, Utc};
use gadfly_domain::traits::{FactStore, ProfileStore};
use gadfly_domain::{DomainPolicy, ExpirationModel, FactDraft, FactQuery, FactStatus, Outcome, ResultRecord};
use gadfly_janitor::{Janitor, JanitorConfig, JanitorError};
use gadfly_store::{KnowledgeGraph, RatingStore};
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_sweep_persists_pruning_and_decay() {
    let dir = tempdir().unwrap();
    let graph_path = dir.path().join("graph.json");
    let ratings_path = dir.path().join("ratings.json");
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let later = start + Duration::days(200);

    let mut graph = KnowledgeGraph::open(&graph_path, ExpirationModel::default_policy());
    graph
        .add_at(FactDraft::new("MD5 is fine for passwords", "security", FactStatus::Blocked, 10.0), start)
        .unwrap();
    graph
        .add_at(FactDraft::new("Binary search needs sorted input", "algorithms", FactStatus::Verified, 95.0), start)
        .unwrap();

    let mut ratings = RatingStore::open(&ratings_path);
    ratings
        .record_result_at(
            "security",
            Outcome::Validated,
            ResultRecord {
                delta: 12.0,
                new_rating: 320.0,
                new_rd: 60.0,
                blocked_reason: None,
                excerpt: None,
            },
            start,
        )
        .unwrap();

    let mut janitor = Janitor::default_config();
    let metrics = janitor.sweep_at(&mut graph, &mut ratings, later).unwrap();
    assert_eq!(metrics.facts_pruned, 1);
    assert_eq!(metrics.profiles_decayed, 1);
    drop(graph);
    drop(ratings);

    let mut graph = KnowledgeGraph::open(&graph_path, ExpirationModel::default_policy());
    let remaining = graph.query(&FactQuery::default()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].domain, "algorithms");

    let mut ratings = RatingStore::open(&ratings_path);
    let profile = ratings.get_domain("security").unwrap();
    assert!(profile.rd > 60.0);
    assert_eq!(profile.last_decayed, Some(later));
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let dir = tempdir().unwrap();
    let graph_path = dir.path().join("graph.json");
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let mut graph = KnowledgeGraph::open(&graph_path, ExpirationModel::default_policy());
    graph
        .add_at(FactDraft::new("GDPR fines cap at 4% of turnover", "compliance", FactStatus::Verified, 70.0), start)
        .unwrap();
    let before = std::fs::read_to_string(&graph_path).unwrap();

    let mut ratings = RatingStore::open(dir.path().join("ratings.json"));
    let mut janitor = Janitor::new(JanitorConfig::default().dry_run(), Arc::new(DomainPolicy::default()));
    let metrics = janitor
        .sweep_at(&mut graph, &mut ratings, start + Duration::days(400))
        .unwrap();

    assert_eq!(metrics.facts_expired, 1);
    assert_eq!(metrics.facts_pruned, 0);
    assert_eq!(std::fs::read_to_string(&graph_path).unwrap(), before);
    assert!(!dir.path().join("ratings.json").exists());
}

#[test]
fn test_corrupt_graph_surfaces_as_graph_error() {
    let dir = tempdir().unwrap();
    let graph_path = dir.path().join("graph.json");
    std::fs::write(&graph_path, "{ \"facts\": [").unwrap();

    let mut graph = KnowledgeGraph::open(&graph_path, ExpirationModel::default_policy());
    let mut ratings = RatingStore::open(dir.path().join("ratings.json"));
    let result = Janitor::default_config().sweep(&mut graph, &mut ratings);
    assert!(matches!(result, Err(JanitorError::Graph(_))));
}
