use std::sync::Arc;

use feature_toggles_sdk::models::CallerContext;
use tracing::{debug, warn};

use crate::config::StoreFailurePolicy;

use super::cache::ToggleCache;
use super::error::DomainError;
use super::groups::is_group_allowed;
use super::repo::{StoreError, ToggleStore};

/// Decides whether a feature is allowed for a caller.
///
/// Reads go through the shared [`ToggleCache`]; the store is only consulted
/// on a cache miss.
pub struct Evaluator {
    store: Arc<dyn ToggleStore>,
    cache: Arc<ToggleCache>,
    on_store_error: StoreFailurePolicy,
}

impl Evaluator {
    #[must_use]
    pub fn new(
        store: Arc<dyn ToggleStore>,
        cache: Arc<ToggleCache>,
        on_store_error: StoreFailurePolicy,
    ) -> Self {
        Self {
            store,
            cache,
            on_store_error,
        }
    }

    /// # Errors
    ///
    /// Returns [`DomainError::StoreUnavailable`] when the store fails and the
    /// failure policy is [`StoreFailurePolicy::Propagate`].
    #[tracing::instrument(skip_all, fields(feature_key = %feature_key, admin = caller.is_admin()))]
    pub async fn is_allowed(
        &self,
        feature_key: &str,
        caller: &CallerContext,
    ) -> Result<bool, DomainError> {
        if caller.is_admin() {
            return Ok(true);
        }
        if feature_key.trim().is_empty() {
            debug!("Blank feature key, denying");
            return Ok(false);
        }

        let store = Arc::clone(&self.store);
        let lookup = self
            .cache
            .get(feature_key, move |key| async move {
                store.find_by_key(&key).await
            })
            .await;

        let record = match lookup {
            Ok(record) => record,
            Err(err) => return self.on_store_failure(err),
        };

        let allowed = record.is_some_and(|record| {
            record.enabled && is_group_allowed(&record.allowed_groups, caller.groups())
        });
        debug!(allowed, "Feature toggle evaluated");
        Ok(allowed)
    }

    fn on_store_failure(&self, err: StoreError) -> Result<bool, DomainError> {
        match self.on_store_error {
            StoreFailurePolicy::Propagate => Err(err.into()),
            StoreFailurePolicy::Deny => {
                warn!(error = %err, "Toggle store unavailable, failing closed");
                Ok(false)
            }
            StoreFailurePolicy::Allow => {
                warn!(error = %err, "Toggle store unavailable, failing open");
                Ok(true)
            }
        }
    }
}
