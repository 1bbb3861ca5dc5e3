//! Switch specialization; cascade-deleted with its asset.
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_switch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub asset_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset::Entity",
        from = "Column::AssetId",
        to = "super::asset::Column::Id"
    )]
    Asset,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(conn: &C, asset_id: i64) -> Result<Model, ModelError> {
    let am = ActiveModel { asset_id: Set(asset_id), ..Default::default() };
    am.insert(conn).await.map_err(ModelError::db)
}

pub async fn find_by_asset<C: ConnectionTrait>(conn: &C, asset_id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find().filter(Column::AssetId.eq(asset_id)).one(conn).await.map_err(ModelError::db)
}
