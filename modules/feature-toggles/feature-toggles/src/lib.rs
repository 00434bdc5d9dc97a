//! Feature Toggles Module Implementation
//!
//! The public API is defined in `feature-toggles-sdk` and re-exported here.
//!
//! ## Architecture
//!
//! - **Evaluator**: answers "is this feature allowed for this caller", reading
//!   through the toggle cache
//! - **Administrator**: creates and updates toggles, then evicts the cache entry
//! - **Storage**: `SeaORM` implementation of the toggle store

pub use feature_toggles_sdk::*;

pub mod config;
pub mod module;
pub use module::FeatureTogglesModule;

#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
