use async_trait::async_trait;
use feature_toggles_sdk::models::ToggleRecord;
use thiserror::Error;

/// Durable toggle store. The only writer of record state.
#[async_trait]
pub trait ToggleStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be read.
    async fn find_by_key(&self, feature_key: &str) -> Result<Option<ToggleRecord>, StoreError>;

    /// Persist `record` and its whitelist atomically.
    ///
    /// A record with `version == 0` is inserted; otherwise the stored row is
    /// replaced only if its version still equals `record.version`. Returns
    /// the record as persisted, with the bumped version.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ConcurrentModification`] on a version mismatch or a
    ///   duplicate create
    /// - [`StoreError::Unavailable`] if the write failed; nothing was persisted
    async fn upsert(&self, record: &ToggleRecord) -> Result<ToggleRecord, StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("toggle store unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),

    #[error("concurrent modification of feature toggle '{feature_key}'")]
    ConcurrentModification { feature_key: String },
}

impl StoreError {
    #[must_use]
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        Self::Unavailable(err.into())
    }

    #[must_use]
    pub fn concurrent_modification(feature_key: impl Into<String>) -> Self {
        Self::ConcurrentModification {
            feature_key: feature_key.into(),
        }
    }
}
