use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// One whitelisted group of a feature toggle.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "feature_toggle_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub toggle_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub group_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::toggle::Entity",
        from = "Column::ToggleId",
        to = "super::toggle::Column::Id",
        on_delete = "Cascade"
    )]
    Toggle,
}

impl Related<super::toggle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Toggle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
