use std::sync::Arc;

use feature_toggles_sdk::FeatureTogglesApi;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::config::FeatureTogglesConfig;
use crate::domain::local_client::LocalClient;
use crate::domain::repo::ToggleStore;
use crate::domain::service::Service;
use crate::infra::storage::{Migrator, SeaOrmToggleStore};

/// Composition root of the feature-toggles module.
///
/// Holds the single per-process [`Service`], and with it the toggle cache.
/// Build it once at startup and share [`api`](Self::api) with consumers.
#[derive(Clone)]
pub struct FeatureTogglesModule {
    service: Arc<Service>,
}

impl FeatureTogglesModule {
    /// Run migrations on `db` and wire the module over it.
    ///
    /// # Errors
    ///
    /// Fails if the schema migrations cannot be applied.
    pub async fn init(
        db: DatabaseConnection,
        config: &FeatureTogglesConfig,
    ) -> anyhow::Result<Self> {
        info!("Initializing feature_toggles module");
        log_config(config);
        migrate(&db).await?;
        Ok(Self::with_store(Arc::new(SeaOrmToggleStore::new(db)), config))
    }

    /// Wire the module over an already prepared store.
    #[must_use]
    pub fn with_store(store: Arc<dyn ToggleStore>, config: &FeatureTogglesConfig) -> Self {
        Self {
            service: Arc::new(Service::new(store, config)),
        }
    }

    /// Transport-agnostic client for this process.
    #[must_use]
    pub fn api(&self) -> Arc<dyn FeatureTogglesApi> {
        Arc::new(LocalClient::new(Arc::clone(&self.service)))
    }
}

fn log_config(config: &FeatureTogglesConfig) {
    debug!(
        cache_ttl = %humantime::format_duration(config.cache_ttl),
        cache_max_entries = config.cache_max_entries,
        max_feature_key_length = config.max_feature_key_length,
        on_store_error = ?config.on_store_error,
        "Loaded feature_toggles config"
    );
}

async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("Running feature_toggles database migrations");
    Migrator::up(db, None).await?;
    info!("Feature toggles database migrations completed successfully");
    Ok(())
}
