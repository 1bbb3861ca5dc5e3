//! Server specialization. One row per asset; the owning asset's delete
//! cascades here.
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum SubAssetType {
    #[default]
    #[sea_orm(num_value = 0)]
    Ecs,
    #[sea_orm(num_value = 1)]
    Rds,
    #[sea_orm(num_value = 2)]
    Mongo,
    #[sea_orm(num_value = 3)]
    Redis,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum CreatedBy {
    #[default]
    #[sea_orm(string_value = "auto")]
    Auto,
    #[sea_orm(string_value = "manual")]
    Manual,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_server")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub asset_id: i64,
    pub sub_asset_type: SubAssetType,
    pub created_by: CreatedBy,
    pub server_id: Option<String>,
    pub image_id: Option<String>,
    pub server_area: Option<String>,
    pub server_name: Option<String>,
    pub cpu: i32,
    pub memory: i32,
    pub capacity: Option<i32>,
    pub instance_type: Option<String>,
    pub os: Option<String>,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub description: Option<String>,
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

#[derive(Debug, Default)]
pub struct NewServer {
    pub sub_asset_type: SubAssetType,
    pub created_by: CreatedBy,
    pub cpu: i32,
    pub memory: i32,
    pub capacity: Option<i32>,
    pub os: Option<String>,
    pub instance_type: Option<String>,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
    pub port: Option<i32>,
}

pub async fn create<C: ConnectionTrait>(conn: &C, asset_id: i64, new: NewServer) -> Result<Model, ModelError> {
    if new.cpu <= 0 {
        return Err(ModelError::Validation("cpu must be positive".into()));
    }
    if new.memory <= 0 {
        return Err(ModelError::Validation("memory must be positive".into()));
    }
    let am = ActiveModel {
        asset_id: Set(asset_id),
        sub_asset_type: Set(new.sub_asset_type),
        created_by: Set(new.created_by),
        cpu: Set(new.cpu),
        memory: Set(new.memory),
        capacity: Set(new.capacity),
        os: Set(new.os),
        instance_type: Set(new.instance_type),
        public_ip: Set(new.public_ip),
        private_ip: Set(new.private_ip),
        port: Set(new.port),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}

pub async fn find_by_asset<C: ConnectionTrait>(conn: &C, asset_id: i64) -> Result<Option<Model>, ModelError> {
    use sea_orm::QueryFilter;
    Entity::find().filter(Column::AssetId.eq(asset_id)).one(conn).await.map_err(ModelError::db)
}
