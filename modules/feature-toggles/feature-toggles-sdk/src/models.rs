//! Public models for the feature-toggles module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the feature-toggles module and its consumers.

use std::collections::BTreeSet;

use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted configuration of a single feature toggle.
///
/// Evaluation is keyed by `feature_key`; `id` only exists for storage-level
/// relational integrity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRecord {
    pub id: Uuid,
    pub feature_key: String,
    /// Global kill-switch. A disabled toggle is denied to everyone but admins.
    pub enabled: bool,
    pub description: Option<String>,
    /// Group whitelist. Empty means open to every caller.
    pub allowed_groups: BTreeSet<String>,
    /// Optimistic-lock counter, `0` for a record that was never persisted.
    pub version: i64,
    pub created_by: String,
    pub created_at: OffsetDateTime,
    pub updated_by: String,
    pub updated_at: OffsetDateTime,
}

impl ToggleRecord {
    /// Whether the record has never been written to a store.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.version == 0
    }
}

/// Create-or-update request for a feature toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleUpdate {
    pub feature_key: String,
    pub enabled: bool,
    /// Replacement whitelist. `None` or an empty list clears it.
    pub groups: Option<Vec<String>>,
    /// Replacement description. `None` keeps the current one.
    pub description: Option<String>,
}

impl ToggleUpdate {
    #[must_use]
    pub fn new(feature_key: impl Into<String>, enabled: bool) -> Self {
        Self {
            feature_key: feature_key.into(),
            enabled,
            groups: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Identity of the caller a toggle is evaluated for.
///
/// `groups: None` models an anonymous caller; it only passes toggles that
/// are enabled with an empty whitelist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    admin: bool,
    groups: Option<BTreeSet<String>>,
}

impl CallerContext {
    #[must_use]
    pub fn new(admin: bool, groups: Option<BTreeSet<String>>) -> Self {
        Self { admin, groups }
    }

    /// Unauthenticated caller without any group membership.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Administrative caller; bypasses every toggle check.
    #[must_use]
    pub fn admin() -> Self {
        Self {
            admin: true,
            groups: None,
        }
    }

    /// Non-admin caller belonging to `groups`.
    #[must_use]
    pub fn member_of<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin: false,
            groups: Some(groups.into_iter().map(Into::into).collect()),
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    #[must_use]
    pub fn groups(&self) -> Option<&BTreeSet<String>> {
        self.groups.as_ref()
    }
}
