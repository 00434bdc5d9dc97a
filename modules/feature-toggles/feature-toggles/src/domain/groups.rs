//! Group whitelist matching.

use std::collections::BTreeSet;

use super::error::DomainError;

/// Whether a caller in `caller_groups` passes the `allowed_groups` whitelist.
///
/// An empty whitelist is open to everyone, including callers without any
/// identity. A non-empty whitelist needs at least one exact, case-sensitive
/// group name in common.
#[must_use]
pub fn is_group_allowed(
    allowed_groups: &BTreeSet<String>,
    caller_groups: Option<&BTreeSet<String>>,
) -> bool {
    if allowed_groups.is_empty() {
        return true;
    }
    caller_groups.is_some_and(|groups| !groups.is_disjoint(allowed_groups))
}

/// Build a whitelist from the groups of an update request.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if any group name is blank.
pub fn collect_whitelist(groups: Option<Vec<String>>) -> Result<BTreeSet<String>, DomainError> {
    let groups = groups.unwrap_or_default();
    if groups.iter().any(|group| group.trim().is_empty()) {
        return Err(DomainError::validation(
            "groups",
            "group names must not be blank",
        ));
    }
    Ok(groups.into_iter().collect())
}
