use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use feature_toggles_sdk::{
    CallerContext, FeatureTogglesApi, FeatureTogglesError, ToggleRecord, ToggleUpdate,
};

use super::service::Service;

/// In-process implementation of [`FeatureTogglesApi`].
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FeatureTogglesApi for LocalClient {
    async fn is_allowed(
        &self,
        feature_key: &str,
        caller: &CallerContext,
    ) -> Result<bool, FeatureTogglesError> {
        self.service
            .is_allowed(feature_key, caller)
            .await
            .map_err(Into::into)
    }

    async fn are_allowed(
        &self,
        feature_keys: &[String],
        caller: &CallerContext,
    ) -> Result<HashMap<String, bool>, FeatureTogglesError> {
        self.service
            .are_allowed(feature_keys, caller)
            .await
            .map_err(Into::into)
    }

    async fn update_feature(
        &self,
        update: ToggleUpdate,
        operator: &str,
    ) -> Result<ToggleRecord, FeatureTogglesError> {
        self.service
            .update_feature(update, operator)
            .await
            .map_err(Into::into)
    }

    async fn get_feature(&self, feature_key: &str) -> Result<ToggleRecord, FeatureTogglesError> {
        self.service
            .get_feature(feature_key)
            .await
            .map_err(Into::into)
    }
}
