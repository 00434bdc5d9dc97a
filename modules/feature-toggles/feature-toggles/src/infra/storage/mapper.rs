use feature_toggles_sdk::models::ToggleRecord;
use sea_orm::ActiveValue::Set;

use super::entity::{toggle, toggle_group};

/// Assemble a record from its toggle row and whitelist rows.
#[must_use]
pub fn to_record(model: toggle::Model, groups: Vec<toggle_group::Model>) -> ToggleRecord {
    ToggleRecord {
        id: model.id,
        feature_key: model.feature_key,
        enabled: model.enabled,
        description: model.description,
        allowed_groups: groups.into_iter().map(|g| g.group_name).collect(),
        version: model.version,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_by: model.updated_by,
        updated_at: model.updated_at,
    }
}

/// Toggle row for `record`, carrying `version` as the stored version.
#[must_use]
pub fn to_active_model(record: &ToggleRecord, version: i64) -> toggle::ActiveModel {
    toggle::ActiveModel {
        id: Set(record.id),
        feature_key: Set(record.feature_key.clone()),
        enabled: Set(record.enabled),
        description: Set(record.description.clone()),
        version: Set(version),
        created_by: Set(record.created_by.clone()),
        created_at: Set(record.created_at),
        updated_by: Set(record.updated_by.clone()),
        updated_at: Set(record.updated_at),
    }
}

#[must_use]
pub fn to_group_models(record: &ToggleRecord) -> Vec<toggle_group::ActiveModel> {
    record
        .allowed_groups
        .iter()
        .map(|group| toggle_group::ActiveModel {
            toggle_id: Set(record.id),
            group_name: Set(group.clone()),
        })
        .collect()
}
