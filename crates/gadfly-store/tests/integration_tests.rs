//! Integration tests for gadfly-store
//!
//! These tests run both stores against real files in a temporary directory.

use chrono::{Duration, TimeZone, Utc};
use gadfly_domain::traits::{FactStore, ProfileStore};
use gadfly_domain::{
    ExpirationModel, FactDraft, FactQuery, FactStatus, Outcome, ResultRecord, Trend,
};
use gadfly_store::{KnowledgeGraph, RatingStore, StoreError};
use std::fs;
use tempfile::tempdir;

fn result(delta: f64, new_rating: f64) -> ResultRecord {
    ResultRecord {
        delta,
        new_rating,
        new_rd: 150.0,
        blocked_reason: None,
        excerpt: Some("Argon2id is the right default for password hashing".to_string()),
    }
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = tempdir().unwrap();
    let mut store = RatingStore::open(dir.path().join("ratings.json"));

    assert!(store.get_summary().unwrap().is_empty());
    assert!(!store.path().exists(), "Reading should not create the file");
}

#[test]
fn test_get_domain_creates_and_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("ratings.json");

    let mut store = RatingStore::open(&path);
    let profile = store.get_domain("Security").unwrap();
    assert_eq!(profile.rating, 0.0);
    assert_eq!(profile.rd, 200.0);
    assert!(path.exists(), "Creation should be flushed, parent included");

    let mut reopened = RatingStore::open(&path);
    let book = reopened.profiles().unwrap();
    assert!(book.get("security").is_some());
}

#[test]
fn test_record_result_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ratings.json");

    let mut store = RatingStore::open(&path);
    store.record_result("security", Outcome::Validated, result(12.5, 12.5)).unwrap();
    store.record_result("security", Outcome::Blocked, result(-3.25, 9.25)).unwrap();
    store.set_provisional("algorithms", 640.0).unwrap();
    let before = store.profiles().unwrap();

    let mut reopened = RatingStore::open(&path);
    let after = reopened.profiles().unwrap();
    assert_eq!(before, after);

    let security = after.get("security").unwrap();
    assert_eq!(security.rating, 9.25);
    assert_eq!(security.blocked_streak, 1);
    assert_eq!(security.consecutive_correct, 0);
    assert_eq!(security.history.len(), 2);
    assert!(security.first_claim_made);
}

#[test]
fn test_no_temp_file_left_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ratings.json");

    let mut store = RatingStore::open(&path);
    store.record_result("performance", Outcome::Partial, result(0.0, 0.0)).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["ratings.json".to_string()]);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["version"], 1);
    assert!(raw["last_updated"].is_string());
    assert!(raw["domains"]["performance"].is_object());
}

#[test]
fn test_corrupt_document_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ratings.json");
    fs::write(&path, "{ not json").unwrap();

    let mut store = RatingStore::open(&path);
    match store.get_domain("security") {
        Err(StoreError::Corrupt { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected a corrupt-document error, got {:?}", other),
    }
}

#[test]
fn test_increment_session_counts_active_domains_only() {
    let dir = tempdir().unwrap();
    let mut store = RatingStore::open(dir.path().join("ratings.json"));

    store.get_domain("idle").unwrap();
    store.record_result("security", Outcome::Validated, result(5.0, 5.0)).unwrap();
    store.record_result("compliance", Outcome::Validated, result(5.0, 5.0)).unwrap();

    assert_eq!(store.increment_session().unwrap(), 2);
    assert_eq!(store.get_domain("security").unwrap().session_count, 1);
    assert_eq!(store.get_domain("idle").unwrap().session_count, 0);
}

#[test]
fn test_summary_order_and_trend() {
    let dir = tempdir().unwrap();
    let mut store = RatingStore::open(dir.path().join("ratings.json"));
    let day = |d| Utc.with_ymd_and_hms(2026, 4, d, 9, 0, 0).unwrap();

    store.get_domain("idle").unwrap();
    store
        .record_result_at("older", Outcome::Blocked, result(-8.0, 0.0), day(1))
        .unwrap();
    store
        .record_result_at("newer", Outcome::Validated, result(9.0, 9.0), day(3))
        .unwrap();

    let summary = store.get_summary().unwrap();
    let names: Vec<&str> = summary.iter().map(|s| s.domain.as_str()).collect();
    assert_eq!(names, vec!["newer", "older", "idle"]);
    assert_eq!(summary[0].trend, Trend::Up);
    assert_eq!(summary[1].trend, Trend::Down);
    assert_eq!(summary[2].trend, Trend::Stable);
}

#[test]
fn test_decay_idle_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ratings.json");
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let mut store = RatingStore::open(&path);
    store
        .record_result_at("security", Outcome::Validated, result(10.0, 10.0), start)
        .unwrap();
    let rd_before = store.get_domain("security").unwrap().rd;

    assert!(store.decay_idle("security", start + Duration::days(90)).unwrap());
    assert!(!store.decay_idle("unknown", start).unwrap());

    let mut reopened = RatingStore::open(&path);
    assert!(reopened.get_domain("security").unwrap().rd > rd_before);
}

fn graph_at(path: &std::path::Path, now: chrono::DateTime<Utc>) -> KnowledgeGraph {
    KnowledgeGraph::open(path, ExpirationModel::default_policy().at(now))
}

#[test]
fn test_add_fact_stamps_expiry() {
    let dir = tempdir().unwrap();
    let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let mut graph = graph_at(&dir.path().join("graph.json"), created);

    let fact = graph
        .add_at(
            FactDraft::new("TLS 1.0 is deprecated", "security", FactStatus::Verified, 95.0),
            created,
        )
        .unwrap();
    assert_eq!(fact.id.as_str().len(), 16);
    assert_eq!(
        fact.expires_at,
        Some(Utc.with_ymd_and_hms(2026, 6, 30, 0, 0, 0).unwrap())
    );

    let timeless = graph
        .add_at(
            FactDraft::new("Quicksort is O(n log n) on average", "algorithms", FactStatus::Verified, 95.0),
            created,
        )
        .unwrap();
    assert_eq!(timeless.expires_at, None);
}

#[test]
fn test_duplicate_claim_is_upserted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let first = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    let later = first + Duration::days(3);
    let mut graph = graph_at(&path, later);

    let original = graph
        .add_at(
            FactDraft::new("Redis is single-threaded", "performance", FactStatus::Claim, 50.0)
                .with_source("blog post"),
            first,
        )
        .unwrap();
    let updated = graph
        .add_at(
            FactDraft::new("Redis is single-threaded", "Performance", FactStatus::Disputed, 30.0)
                .with_proof("io-threads option since 6.0"),
            later,
        )
        .unwrap();

    assert_eq!(graph.len().unwrap(), 1);
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, first);
    assert_eq!(updated.updated_at, later);
    assert_eq!(updated.status, FactStatus::Disputed);
    assert_eq!(updated.confidence, 30.0);
    assert_eq!(updated.source.as_deref(), Some("blog post"));
    assert_eq!(updated.proof.as_deref(), Some("io-threads option since 6.0"));
}

#[test]
fn test_reverified_fact_survives_prune() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let first = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let reverified = Utc.with_ymd_and_hms(2026, 7, 20, 0, 0, 0).unwrap();
    let mut graph = graph_at(&path, reverified);

    graph
        .add_at(
            FactDraft::new("TLS 1.0 is deprecated", "security", FactStatus::Claim, 50.0),
            first,
        )
        .unwrap();
    let fact = graph
        .add_at(
            FactDraft::new("TLS 1.0 is deprecated", "security", FactStatus::Verified, 95.0)
                .with_source("RFC 8996"),
            reverified,
        )
        .unwrap();

    assert_eq!(fact.created_at, first);
    assert_eq!(
        fact.expires_at,
        Some(Utc.with_ymd_and_hms(2027, 1, 16, 0, 0, 0).unwrap())
    );

    let model = ExpirationModel::default_policy().at(reverified);
    assert_eq!(graph.prune(&model).unwrap(), 0);
    assert_eq!(graph.len().unwrap(), 1);
}

#[test]
fn test_stored_id_matches_draft_id() {
    let dir = tempdir().unwrap();
    let mut graph = graph_at(&dir.path().join("graph.json"), Utc::now());

    let draft = FactDraft::new(" Argon2 beats bcrypt ", "Security", FactStatus::Claim, 50.0);
    let expected = draft.id();
    let stored = graph.add(draft).unwrap();
    assert_eq!(stored.id, expected);
    assert_eq!(stored.claim, "Argon2 beats bcrypt");
    assert_eq!(stored.domain, "security");
}

#[test]
fn test_invalid_fact_touches_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let mut graph = graph_at(&path, Utc::now());

    let err = graph
        .add(FactDraft::new("", "security", FactStatus::Claim, 50.0))
        .unwrap_err();
    assert!(matches!(err, StoreError::Domain(_)));
    assert!(!path.exists());
}

#[test]
fn test_query_filters() {
    let dir = tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();
    let mut graph = graph_at(&dir.path().join("graph.json"), now);

    graph
        .add_at(
            FactDraft::new("HSTS needs HTTPS", "security", FactStatus::Verified, 95.0)
                .with_session("s1"),
            now,
        )
        .unwrap();
    graph
        .add_at(
            FactDraft::new("MD5 is fine for passwords", "security", FactStatus::Blocked, 20.0)
                .with_session("s2")
                .backdated(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            now,
        )
        .unwrap();
    graph
        .add_at(
            FactDraft::new("Binary search needs sorted input", "algorithms", FactStatus::Verified, 95.0),
            now,
        )
        .unwrap();

    let security = graph
        .query(&FactQuery {
            domain: Some("SECURITY".to_string()),
            ..FactQuery::default()
        })
        .unwrap();
    assert_eq!(security.len(), 2);

    let verified = graph
        .query(&FactQuery {
            status: Some(FactStatus::Verified),
            ..FactQuery::default()
        })
        .unwrap();
    assert_eq!(verified.len(), 2);

    let session = graph
        .query(&FactQuery {
            session_id: Some("s2".to_string()),
            ..FactQuery::default()
        })
        .unwrap();
    assert_eq!(session.len(), 1);

    let expired = graph
        .query(&FactQuery {
            expired_only: true,
            ..FactQuery::default()
        })
        .unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].claim, "MD5 is fine for passwords");
}

#[test]
fn test_audit_and_prune() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let now = Utc.with_ymd_and_hms(2026, 6, 15, 0, 0, 0).unwrap();
    let model = ExpirationModel::default_policy().at(now);
    let mut graph = KnowledgeGraph::open(&path, model.clone());

    let old = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let recent = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    graph
        .add(FactDraft::new("HTTP/2 push helps", "performance", FactStatus::Claim, 50.0).backdated(old))
        .unwrap();
    graph
        .add(FactDraft::new("Use SameSite cookies", "security", FactStatus::Verified, 80.0).backdated(recent))
        .unwrap();
    graph
        .add(FactDraft::new("Dijkstra needs non-negative weights", "algorithms", FactStatus::Verified, 95.0).backdated(old))
        .unwrap();

    let report = graph.audit(&model).unwrap();
    assert_eq!(report.expired.len(), 1);
    assert_eq!(report.expiring_soon.len(), 1);
    assert_eq!(report.healthy.len(), 1);

    assert_eq!(graph.prune(&model).unwrap(), 1);
    assert_eq!(graph.prune(&model).unwrap(), 0);

    let mut reopened = KnowledgeGraph::open(&path, model.clone());
    let stats = reopened.stats().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_domain.get("performance"), None);
    assert_eq!(stats.by_status[&FactStatus::Verified], 2);
}

#[test]
fn test_graph_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("graph.json");
    let mut graph = graph_at(&path, Utc::now());

    graph
        .add(
            FactDraft::new("Rust's borrow checker prevents data races", "languages", FactStatus::Verified, 92.5)
                .with_source("The Rustonomicon")
                .with_proof("Send/Sync rules"),
        )
        .unwrap();
    graph
        .add(FactDraft::new("Tabs beat spaces", "style", FactStatus::Opinion, 33.3))
        .unwrap();
    let before = graph.query(&FactQuery::default()).unwrap();

    let mut reopened = graph_at(&path, Utc::now());
    let after = reopened.query(&FactQuery::default()).unwrap();
    assert_eq!(before, after);
}
