use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_business_unit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub owners: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_unit::Entity")]
    ProductUnit,
    #[sea_orm(has_many = "super::domain::Entity")]
    Domain,
    #[sea_orm(has_many = "super::user_profile::Entity")]
    UserProfile,
    #[sea_orm(has_many = "super::asset::Entity")]
    Asset,
}

impl Related<super::product_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductUnit.def()
    }
}

impl Related<super::domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Domain.def()
    }
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(conn: &C, name: &str, owners: Option<&str>) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("business unit name required".into()));
    }
    let existing = Entity::find()
        .filter(Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(ModelError::db)?;
    if existing.is_some() {
        return Err(ModelError::Uniqueness(format!("business unit '{name}' already exists")));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        owners: Set(owners.map(|s| s.to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}
