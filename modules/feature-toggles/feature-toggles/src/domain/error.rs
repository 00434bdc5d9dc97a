use feature_toggles_sdk::errors::FeatureTogglesError;

use super::repo::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Feature toggle not found: {feature_key}")]
    NotFound { feature_key: String },

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Feature toggle was modified concurrently: {feature_key}")]
    ConcurrentModification { feature_key: String },

    #[error("Toggle store unavailable: {0:#}")]
    StoreUnavailable(#[source] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn not_found(feature_key: impl Into<String>) -> Self {
        Self::NotFound {
            feature_key: feature_key.into(),
        }
    }

    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(source) => Self::StoreUnavailable(source),
            StoreError::ConcurrentModification { feature_key } => {
                Self::ConcurrentModification { feature_key }
            }
        }
    }
}

impl From<DomainError> for FeatureTogglesError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { feature_key } => Self::not_found(feature_key),
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::ConcurrentModification { feature_key } => {
                Self::concurrent_modification(feature_key)
            }
            DomainError::StoreUnavailable(source) => Self::store_unavailable(format!("{source:#}")),
        }
    }
}
