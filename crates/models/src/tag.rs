use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub creator_id: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::CreatorId",
        to = "super::user_profile::Column::Id"
    )]
    Creator,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        super::asset_tag::Relation::Asset.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::asset_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(conn: &C, name: &str, creator_id: Option<i64>) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("tag name required".into()));
    }
    let existing = Entity::find()
        .filter(Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(ModelError::db)?;
    if existing.is_some() {
        return Err(ModelError::Uniqueness(format!("tag '{name}' already exists")));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        creator_id: Set(creator_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}
