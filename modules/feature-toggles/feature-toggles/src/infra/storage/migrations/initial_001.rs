use sea_orm_migration::prelude::*;

use crate::config::FEATURE_KEY_COLUMN_LENGTH;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeatureToggles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeatureToggles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeatureToggles::FeatureKey)
                            .string_len(FEATURE_KEY_COLUMN_LENGTH)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FeatureToggles::Enabled).boolean().not_null())
                    .col(ColumnDef::new(FeatureToggles::Description).text())
                    .col(
                        ColumnDef::new(FeatureToggles::Version)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeatureToggles::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(FeatureToggles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeatureToggles::UpdatedBy).string().not_null())
                    .col(
                        ColumnDef::new(FeatureToggles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeatureToggleGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeatureToggleGroups::ToggleId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeatureToggleGroups::GroupName)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(FeatureToggleGroups::ToggleId)
                            .col(FeatureToggleGroups::GroupName),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feature_toggle_groups_toggle")
                            .from(FeatureToggleGroups::Table, FeatureToggleGroups::ToggleId)
                            .to(FeatureToggles::Table, FeatureToggles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeatureToggleGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeatureToggles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeatureToggles {
    Table,
    Id,
    FeatureKey,
    Enabled,
    Description,
    Version,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeatureToggleGroups {
    Table,
    ToggleId,
    GroupName,
}
