use std::collections::HashMap;
use std::sync::Arc;

use feature_toggles_sdk::models::{CallerContext, ToggleRecord, ToggleUpdate};

use crate::config::FeatureTogglesConfig;

use super::admin::Administrator;
use super::cache::ToggleCache;
use super::error::DomainError;
use super::evaluator::Evaluator;
use super::repo::ToggleStore;

/// Feature-toggles service.
///
/// Owns the process-local toggle cache shared by the evaluator and the
/// administrator. Built once per process; the cache is only ever cleared
/// entry by entry through administrative updates.
pub struct Service {
    evaluator: Evaluator,
    administrator: Administrator,
}

impl Service {
    #[must_use]
    pub fn new(store: Arc<dyn ToggleStore>, config: &FeatureTogglesConfig) -> Self {
        let cache = Arc::new(ToggleCache::new(
            config.cache_ttl,
            config.cache_max_entries,
        ));

        Self {
            evaluator: Evaluator::new(
                Arc::clone(&store),
                Arc::clone(&cache),
                config.on_store_error,
            ),
            administrator: Administrator::new(store, cache, config.max_feature_key_length),
        }
    }

    /// # Errors
    ///
    /// See [`Evaluator::is_allowed`].
    pub async fn is_allowed(
        &self,
        feature_key: &str,
        caller: &CallerContext,
    ) -> Result<bool, DomainError> {
        self.evaluator.is_allowed(feature_key, caller).await
    }

    /// # Errors
    ///
    /// Fails on the first key whose evaluation fails.
    pub async fn are_allowed(
        &self,
        feature_keys: &[String],
        caller: &CallerContext,
    ) -> Result<HashMap<String, bool>, DomainError> {
        let mut result = HashMap::with_capacity(feature_keys.len());
        for feature_key in feature_keys {
            if result.contains_key(feature_key) {
                continue;
            }
            let allowed = self.evaluator.is_allowed(feature_key, caller).await?;
            result.insert(feature_key.clone(), allowed);
        }
        Ok(result)
    }

    /// # Errors
    ///
    /// See [`Administrator::update_feature`].
    pub async fn update_feature(
        &self,
        update: ToggleUpdate,
        operator: &str,
    ) -> Result<ToggleRecord, DomainError> {
        self.administrator.update_feature(update, operator).await
    }

    /// # Errors
    ///
    /// See [`Administrator::get_feature`].
    pub async fn get_feature(&self, feature_key: &str) -> Result<ToggleRecord, DomainError> {
        self.administrator.get_feature(feature_key).await
    }
}
