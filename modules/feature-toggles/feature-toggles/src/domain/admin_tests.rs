#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use feature_toggles_sdk::models::{ToggleRecord, ToggleUpdate};

use super::admin::Administrator;
use super::cache::ToggleCache;
use super::error::DomainError;
use super::repo::{StoreError, ToggleStore};
use super::test_support::{MockToggleStore, record};

const MAX_KEY: usize = 50;

fn administrator(store: &Arc<MockToggleStore>) -> (Administrator, Arc<ToggleCache>) {
    let cache = Arc::new(ToggleCache::new(Duration::from_secs(60), 500));
    let admin = Administrator::new(Arc::clone(store) as _, Arc::clone(&cache), MAX_KEY);
    (admin, cache)
}

async fn load_through(
    cache: &ToggleCache,
    store: &Arc<MockToggleStore>,
    feature_key: &str,
) -> Option<Arc<ToggleRecord>> {
    let store = Arc::clone(store);
    cache
        .get(feature_key, move |key| async move {
            store.find_by_key(&key).await
        })
        .await
        .unwrap()
}

fn set(groups: &[&str]) -> BTreeSet<String> {
    groups.iter().map(|g| (*g).to_owned()).collect()
}

#[tokio::test]
async fn test_create_records_creator() {
    // Arrange
    let store = Arc::new(MockToggleStore::new());
    let (admin, _) = administrator(&store);

    // Act
    let created = admin
        .update_feature(
            ToggleUpdate::new("PAY", false).with_description("payments"),
            "alice",
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(created.feature_key, "PAY");
    assert!(!created.enabled);
    assert_eq!(created.created_by, "alice");
    assert_eq!(created.updated_by, "alice");
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.version, 1, "First write is persisted as version 1");
    assert_eq!(created.description.as_deref(), Some("payments"));
    assert_eq!(store.stored("PAY"), Some(created));
}

#[tokio::test]
async fn test_update_keeps_creation_metadata() {
    // Arrange
    let seeded = record("PAY", false, &[]);
    let store = Arc::new(MockToggleStore::with_records([seeded.clone()]));
    let (admin, _) = administrator(&store);

    // Act
    let updated = admin
        .update_feature(ToggleUpdate::new("PAY", true), "bob")
        .await
        .unwrap();

    // Assert
    assert_eq!(updated.id, seeded.id, "Identity must survive updates");
    assert_eq!(updated.created_by, "seed");
    assert_eq!(updated.created_at, seeded.created_at);
    assert_eq!(updated.updated_by, "bob");
    assert!(updated.updated_at >= seeded.updated_at);
    assert!(updated.enabled);
    assert_eq!(updated.version, seeded.version + 1);
}

#[tokio::test]
async fn test_validation_happens_before_store_access() {
    let store = Arc::new(MockToggleStore::new());
    let (admin, _) = administrator(&store);
    let too_long = "K".repeat(MAX_KEY + 1);

    let cases = [
        (ToggleUpdate::new("", true), "ops", "feature_key"),
        (ToggleUpdate::new("   ", true), "ops", "feature_key"),
        (ToggleUpdate::new(too_long, true), "ops", "feature_key"),
        (ToggleUpdate::new("PAY", true), " ", "operator"),
        (
            ToggleUpdate::new("PAY", true).with_groups(["BETA", " "]),
            "ops",
            "groups",
        ),
    ];

    for (update, operator, expected_field) in cases {
        let err = admin.update_feature(update, operator).await.unwrap_err();
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            other => panic!("Expected validation error, got: {other}"),
        }
    }

    assert_eq!(store.lookups(), 0, "Invalid input must not reach the store");
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_key_at_maximum_length_is_accepted() {
    let store = Arc::new(MockToggleStore::new());
    let (admin, _) = administrator(&store);
    let key = "\u{e9}".repeat(MAX_KEY);

    let created = admin
        .update_feature(ToggleUpdate::new(key.clone(), true), "ops")
        .await
        .unwrap();

    assert_eq!(created.feature_key, key, "Length is counted in characters");
}

#[tokio::test]
async fn test_duplicate_groups_are_collapsed() {
    let store = Arc::new(MockToggleStore::new());
    let (admin, _) = administrator(&store);

    let created = admin
        .update_feature(
            ToggleUpdate::new("PAY", true).with_groups(["BETA", "GA", "BETA"]),
            "ops",
        )
        .await
        .unwrap();

    assert_eq!(created.allowed_groups, set(&["BETA", "GA"]));
}

#[tokio::test]
async fn test_missing_or_empty_groups_clear_whitelist() {
    let store = Arc::new(MockToggleStore::with_records([record("PAY", true, &["BETA"])]));
    let (admin, _) = administrator(&store);

    let cleared = admin
        .update_feature(ToggleUpdate::new("PAY", true), "ops")
        .await
        .unwrap();
    assert!(cleared.allowed_groups.is_empty(), "None clears the whitelist");

    admin
        .update_feature(ToggleUpdate::new("PAY", true).with_groups(["BETA"]), "ops")
        .await
        .unwrap();
    let cleared = admin
        .update_feature(
            ToggleUpdate::new("PAY", true).with_groups(Vec::<String>::new()),
            "ops",
        )
        .await
        .unwrap();
    assert!(cleared.allowed_groups.is_empty(), "Empty list clears the whitelist");
}

#[tokio::test]
async fn test_description_is_kept_unless_replaced() {
    let store = Arc::new(MockToggleStore::new());
    let (admin, _) = administrator(&store);

    admin
        .update_feature(ToggleUpdate::new("PAY", true).with_description("v1"), "ops")
        .await
        .unwrap();
    let kept = admin
        .update_feature(ToggleUpdate::new("PAY", false), "ops")
        .await
        .unwrap();
    assert_eq!(kept.description.as_deref(), Some("v1"));

    let replaced = admin
        .update_feature(ToggleUpdate::new("PAY", false).with_description("v2"), "ops")
        .await
        .unwrap();
    assert_eq!(replaced.description.as_deref(), Some("v2"));
}

#[tokio::test]
async fn test_repeated_update_is_idempotent() {
    let store = Arc::new(MockToggleStore::new());
    let (admin, _) = administrator(&store);
    let update = ToggleUpdate::new("PAY", true).with_groups(["BETA"]);

    let first = admin.update_feature(update.clone(), "ops").await.unwrap();
    let second = admin.update_feature(update, "ops").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.enabled, second.enabled);
    assert_eq!(first.allowed_groups, second.allowed_groups);
    assert_eq!(first.created_at, second.created_at);
}

#[tokio::test]
async fn test_write_failure_keeps_cache_and_surfaces_error() {
    // Arrange
    let store = Arc::new(MockToggleStore::with_records([record("PAY", true, &[])]));
    let (admin, cache) = administrator(&store);
    let cached = load_through(&cache, &store, "PAY").await;
    assert!(cached.is_some_and(|r| r.enabled));
    store.set_fail_writes(true);

    // Act
    let err = admin
        .update_feature(ToggleUpdate::new("PAY", false), "ops")
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err, DomainError::StoreUnavailable(_)));
    assert!(store.stored("PAY").is_some_and(|r| r.enabled), "Store unchanged");
    let lookups = store.lookups();
    let still_cached = load_through(&cache, &store, "PAY").await;
    assert!(still_cached.is_some_and(|r| r.enabled));
    assert_eq!(store.lookups(), lookups, "Cache entry must not be evicted");
}

#[tokio::test]
async fn test_successful_write_evicts_cache_entry() {
    let store = Arc::new(MockToggleStore::with_records([record("PAY", true, &[])]));
    let (admin, cache) = administrator(&store);
    load_through(&cache, &store, "PAY").await;

    admin
        .update_feature(ToggleUpdate::new("PAY", false), "ops")
        .await
        .unwrap();

    let reloaded = load_through(&cache, &store, "PAY").await;
    assert!(reloaded.is_some_and(|r| !r.enabled));
}

/// Store whose record changes right after every read, as if another
/// administrator wrote in between.
struct RacingStore {
    inner: MockToggleStore,
}

#[async_trait]
impl ToggleStore for RacingStore {
    async fn find_by_key(&self, feature_key: &str) -> Result<Option<ToggleRecord>, StoreError> {
        let found = self.inner.find_by_key(feature_key).await?;
        if found.is_some() {
            self.inner.bump(feature_key, true);
        }
        Ok(found)
    }

    async fn upsert(&self, record: &ToggleRecord) -> Result<ToggleRecord, StoreError> {
        self.inner.upsert(record).await
    }
}

#[tokio::test]
async fn test_concurrent_write_is_rejected() {
    // Arrange
    let store = Arc::new(RacingStore {
        inner: MockToggleStore::with_records([record("PAY", true, &[])]),
    });
    let cache = Arc::new(ToggleCache::new(Duration::from_secs(60), 500));
    let admin = Administrator::new(Arc::clone(&store) as _, cache, MAX_KEY);

    // Act
    let err = admin
        .update_feature(ToggleUpdate::new("PAY", false), "ops")
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(
        err,
        DomainError::ConcurrentModification { ref feature_key } if feature_key == "PAY"
    ));
    assert!(
        store.inner.stored("PAY").is_some_and(|r| r.enabled),
        "The other writer's change must survive"
    );
}

#[tokio::test]
async fn test_get_feature_reads_store() {
    let store = Arc::new(MockToggleStore::with_records([record("PAY", true, &["BETA"])]));
    let (admin, _) = administrator(&store);

    let found = admin.get_feature("PAY").await.unwrap();
    let missing = admin.get_feature("NOPE").await.unwrap_err();

    assert_eq!(found.allowed_groups, set(&["BETA"]));
    assert!(matches!(
        missing,
        DomainError::NotFound { ref feature_key } if feature_key == "NOPE"
    ));
}
