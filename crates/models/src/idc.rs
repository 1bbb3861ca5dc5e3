use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_idc")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::idc_room::Entity")]
    IdcRoom,
    #[sea_orm(has_many = "super::asset::Entity")]
    Asset,
}

impl Related<super::idc_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IdcRoom.def()
    }
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(conn: &C, name: &str, description: Option<&str>) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("idc name required".into()));
    }
    let existing = Entity::find()
        .filter(Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(ModelError::db)?;
    if existing.is_some() {
        return Err(ModelError::Uniqueness(format!("idc '{name}' already exists")));
    }
    let am = ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.map(|s| s.to_string())),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}
