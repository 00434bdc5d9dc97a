use async_trait::async_trait;
use feature_toggles_sdk::models::ToggleRecord;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, ModelTrait,
    QueryFilter, SqlErr, TransactionTrait,
};
use tracing::debug;

use crate::domain::repo::{StoreError, ToggleStore};

use super::entity::{toggle, toggle_group};
use super::mapper;

/// [`ToggleStore`] backed by a relational database through `SeaORM`.
///
/// A toggle and its whitelist rows are always read and written in one
/// transaction.
pub struct SeaOrmToggleStore {
    db: DatabaseConnection,
}

impl SeaOrmToggleStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(
        txn: &DatabaseTransaction,
        feature_key: &str,
    ) -> Result<Option<ToggleRecord>, DbErr> {
        let Some(model) = toggle::Entity::find()
            .filter(toggle::Column::FeatureKey.eq(feature_key))
            .one(txn)
            .await?
        else {
            return Ok(None);
        };
        let groups = model.find_related(toggle_group::Entity).all(txn).await?;
        Ok(Some(mapper::to_record(model, groups)))
    }

    /// Returns `None` when the stored version no longer matches.
    async fn write(&self, record: &ToggleRecord) -> Result<Option<ToggleRecord>, DbErr> {
        let txn = self.db.begin().await?;
        let next_version = record.version + 1;

        if record.is_new() {
            toggle::Entity::insert(mapper::to_active_model(record, next_version))
                .exec_without_returning(&txn)
                .await?;
        } else {
            let result = toggle::Entity::update_many()
                .set(mapper::to_active_model(record, next_version))
                .filter(toggle::Column::Id.eq(record.id))
                .filter(toggle::Column::Version.eq(record.version))
                .exec(&txn)
                .await?;
            if result.rows_affected == 0 {
                txn.rollback().await?;
                return Ok(None);
            }

            toggle_group::Entity::delete_many()
                .filter(toggle_group::Column::ToggleId.eq(record.id))
                .exec(&txn)
                .await?;
        }

        let groups = mapper::to_group_models(record);
        if !groups.is_empty() {
            toggle_group::Entity::insert_many(groups)
                .exec_without_returning(&txn)
                .await?;
        }

        let persisted = Self::load(&txn, &record.feature_key).await?;
        txn.commit().await?;
        Ok(persisted)
    }
}

#[async_trait]
impl ToggleStore for SeaOrmToggleStore {
    async fn find_by_key(&self, feature_key: &str) -> Result<Option<ToggleRecord>, StoreError> {
        let read = async {
            let txn = self.db.begin().await?;
            let record = Self::load(&txn, feature_key).await?;
            txn.commit().await?;
            Ok::<_, DbErr>(record)
        };
        read.await.map_err(|e| map_db_err(e, feature_key))
    }

    async fn upsert(&self, record: &ToggleRecord) -> Result<ToggleRecord, StoreError> {
        match self.write(record).await {
            Ok(Some(persisted)) => Ok(persisted),
            Ok(None) => {
                debug!(
                    feature_key = %record.feature_key,
                    expected_version = record.version,
                    "Stale toggle version, write rejected"
                );
                Err(StoreError::concurrent_modification(&record.feature_key))
            }
            Err(e) => Err(map_db_err(e, &record.feature_key)),
        }
    }
}

/// A unique-key violation means another writer created the same toggle first.
fn map_db_err(err: DbErr, feature_key: &str) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return StoreError::concurrent_modification(feature_key);
    }
    StoreError::unavailable(err)
}
