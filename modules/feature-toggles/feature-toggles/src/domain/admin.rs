use std::collections::BTreeSet;
use std::sync::Arc;

use feature_toggles_sdk::models::{ToggleRecord, ToggleUpdate};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::cache::ToggleCache;
use super::error::DomainError;
use super::groups::collect_whitelist;
use super::repo::ToggleStore;

/// Applies toggle mutations and keeps the cache coherent with the store.
pub struct Administrator {
    store: Arc<dyn ToggleStore>,
    cache: Arc<ToggleCache>,
    max_feature_key_length: usize,
}

impl Administrator {
    #[must_use]
    pub fn new(
        store: Arc<dyn ToggleStore>,
        cache: Arc<ToggleCache>,
        max_feature_key_length: usize,
    ) -> Self {
        Self {
            store,
            cache,
            max_feature_key_length,
        }
    }

    /// Create or update the toggle named by `update.feature_key`.
    ///
    /// The existing record is read from the store, not the cache. The cache
    /// entry is evicted only after the write committed.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Validation`] for malformed input, before any store access
    /// - [`DomainError::ConcurrentModification`] if the record changed since it was read
    /// - [`DomainError::StoreUnavailable`] if the store failed; the cache is left as is
    #[tracing::instrument(skip_all, fields(feature_key = %update.feature_key, operator = %operator))]
    pub async fn update_feature(
        &self,
        update: ToggleUpdate,
        operator: &str,
    ) -> Result<ToggleRecord, DomainError> {
        self.validate_feature_key(&update.feature_key)?;
        if operator.trim().is_empty() {
            return Err(DomainError::validation("operator", "must not be blank"));
        }
        let allowed_groups = collect_whitelist(update.groups)?;

        let now = OffsetDateTime::now_utc();
        let existing = self.store.find_by_key(&update.feature_key).await?;
        let mut record = match existing {
            Some(existing) => existing,
            None => ToggleRecord {
                id: Uuid::new_v4(),
                feature_key: update.feature_key,
                enabled: false,
                description: None,
                allowed_groups: BTreeSet::new(),
                version: 0,
                created_by: operator.to_owned(),
                created_at: now,
                updated_by: operator.to_owned(),
                updated_at: now,
            },
        };

        record.enabled = update.enabled;
        record.allowed_groups = allowed_groups;
        if let Some(description) = update.description {
            record.description = Some(description);
        }
        operator.clone_into(&mut record.updated_by);
        record.updated_at = now;

        let created = record.is_new();
        let persisted = self.store.upsert(&record).await?;
        self.cache.invalidate(&persisted.feature_key).await;

        info!(
            created,
            enabled = persisted.enabled,
            groups = persisted.allowed_groups.len(),
            version = persisted.version,
            "Feature toggle saved"
        );
        Ok(persisted)
    }

    /// Read the toggle straight from the store.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if no toggle exists for the key.
    pub async fn get_feature(&self, feature_key: &str) -> Result<ToggleRecord, DomainError> {
        self.validate_feature_key(feature_key)?;
        self.store
            .find_by_key(feature_key)
            .await?
            .ok_or_else(|| DomainError::not_found(feature_key))
    }

    fn validate_feature_key(&self, feature_key: &str) -> Result<(), DomainError> {
        if feature_key.trim().is_empty() {
            return Err(DomainError::validation("feature_key", "must not be blank"));
        }
        if feature_key.chars().count() > self.max_feature_key_length {
            return Err(DomainError::validation(
                "feature_key",
                format!("exceeds maximum length of {}", self.max_feature_key_length),
            ));
        }
        Ok(())
    }
}
