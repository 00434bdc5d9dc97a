#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Feature Toggles SDK.
//!
//! This crate defines **transport-agnostic** types used by the `feature-toggles` module.
//!
//! # Public API
//!
//! - [`FeatureTogglesApi`]: evaluation and administration contract.
//! - [`ToggleRecord`]: persisted toggle configuration.
//! - [`CallerContext`]: identity of the caller being evaluated.
//! - [`ToggleUpdate`]: create-or-update request.

pub mod api;
pub mod errors;
pub mod models;

pub use api::FeatureTogglesApi;
pub use errors::FeatureTogglesError;
pub use models::{CallerContext, ToggleRecord, ToggleUpdate};
