//! `FeatureTogglesApi` trait definition.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::FeatureTogglesError;
use crate::models::{CallerContext, ToggleRecord, ToggleUpdate};

/// Public API trait for the feature-toggles module.
///
/// Evaluation methods never fail for unknown or disabled toggles: those
/// resolve to `false`. Only store failures surface as errors, and only when
/// the module is configured to propagate them.
#[async_trait]
pub trait FeatureTogglesApi: Send + Sync {
    /// Whether `feature_key` is allowed for `caller`.
    ///
    /// Admin callers are always allowed without a store lookup.
    ///
    /// # Errors
    ///
    /// [`FeatureTogglesError::StoreUnavailable`] when the store fails and
    /// store errors are propagated.
    async fn is_allowed(
        &self,
        feature_key: &str,
        caller: &CallerContext,
    ) -> Result<bool, FeatureTogglesError>;

    /// Batch variant of [`is_allowed`](Self::is_allowed). Duplicate keys
    /// collapse into one map entry.
    ///
    /// # Errors
    ///
    /// Fails on the first key whose evaluation fails.
    async fn are_allowed(
        &self,
        feature_keys: &[String],
        caller: &CallerContext,
    ) -> Result<HashMap<String, bool>, FeatureTogglesError>;

    /// Create the toggle if it does not exist, otherwise update it in place.
    ///
    /// # Errors
    ///
    /// - [`FeatureTogglesError::Validation`] for a blank or overlong key, a
    ///   blank operator or a blank group name
    /// - [`FeatureTogglesError::ConcurrentModification`] if another write won
    /// - [`FeatureTogglesError::StoreUnavailable`] if nothing could be persisted
    async fn update_feature(
        &self,
        update: ToggleUpdate,
        operator: &str,
    ) -> Result<ToggleRecord, FeatureTogglesError>;

    /// Read the current toggle straight from the store.
    ///
    /// # Errors
    ///
    /// [`FeatureTogglesError::NotFound`] if no toggle exists for the key.
    async fn get_feature(&self, feature_key: &str) -> Result<ToggleRecord, FeatureTogglesError>;
}
