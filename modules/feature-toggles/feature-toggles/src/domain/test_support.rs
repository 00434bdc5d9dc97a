#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use feature_toggles_sdk::models::ToggleRecord;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::{StoreError, ToggleStore};

/// In-memory toggle store with failure injection and call counters.
#[derive(Default)]
pub struct MockToggleStore {
    records: Mutex<HashMap<String, ToggleRecord>>,
    lookups: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ToggleRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.lock().unwrap();
            for record in records {
                map.insert(record.feature_key.clone(), record);
            }
        }
        store
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self, feature_key: &str) -> Option<ToggleRecord> {
        self.records.lock().unwrap().get(feature_key).cloned()
    }

    /// Overwrite a record behind the service's back, bumping its version.
    pub fn bump(&self, feature_key: &str, enabled: bool) {
        let mut map = self.records.lock().unwrap();
        let record = map.get_mut(feature_key).expect("record to bump");
        record.enabled = enabled;
        record.version += 1;
    }
}

#[async_trait]
impl ToggleStore for MockToggleStore {
    async fn find_by_key(&self, feature_key: &str) -> Result<Option<ToggleRecord>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(anyhow::anyhow!("store is down")));
        }
        Ok(self.records.lock().unwrap().get(feature_key).cloned())
    }

    async fn upsert(&self, record: &ToggleRecord) -> Result<ToggleRecord, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(anyhow::anyhow!("store is down")));
        }

        let mut map = self.records.lock().unwrap();
        let stored_version = map.get(&record.feature_key).map_or(0, |r| r.version);
        if stored_version != record.version {
            return Err(StoreError::concurrent_modification(&record.feature_key));
        }

        let mut persisted = record.clone();
        persisted.version += 1;
        map.insert(persisted.feature_key.clone(), persisted.clone());
        Ok(persisted)
    }
}

/// A persisted record as the store would return it.
pub fn record(feature_key: &str, enabled: bool, groups: &[&str]) -> ToggleRecord {
    let now = OffsetDateTime::now_utc();
    ToggleRecord {
        id: Uuid::new_v4(),
        feature_key: feature_key.to_owned(),
        enabled,
        description: None,
        allowed_groups: groups.iter().map(|g| (*g).to_owned()).collect::<BTreeSet<_>>(),
        version: 1,
        created_by: "seed".to_owned(),
        created_at: now,
        updated_by: "seed".to_owned(),
        updated_at: now,
    }
}
