//! Toggle persistence on `SeaORM`.
//!
//! - `entity/` - table definitions for toggles and their group whitelist
//! - `mapper.rs` - rows to [`ToggleRecord`](feature_toggles_sdk::ToggleRecord)
//! - `migrations/` - schema migrations
//! - `sea_orm_repo.rs` - the [`ToggleStore`](crate::domain::repo::ToggleStore) implementation

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;

pub use migrations::Migrator;
pub use sea_orm_repo::SeaOrmToggleStore;
