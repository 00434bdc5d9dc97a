//! Error types for the feature-toggles SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureTogglesError {
    #[error("Feature toggle not found: {feature_key}")]
    NotFound { feature_key: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Feature toggle was modified concurrently: {feature_key}")]
    ConcurrentModification { feature_key: String },

    #[error("Toggle store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl FeatureTogglesError {
    #[must_use]
    pub fn not_found(feature_key: impl Into<String>) -> Self {
        Self::NotFound {
            feature_key: feature_key.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn concurrent_modification(feature_key: impl Into<String>) -> Self {
        Self::ConcurrentModification {
            feature_key: feature_key.into(),
        }
    }

    #[must_use]
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Whether the caller may succeed by retrying the same request.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConcurrentModification { .. } | Self::StoreUnavailable { .. }
        )
    }
}
