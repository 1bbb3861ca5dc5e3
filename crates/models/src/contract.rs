use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_contract")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub number: String,
    pub signed_at: Option<Date>,
    pub expired_at: Option<Date>,
    pub memo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::asset::Entity")]
    Asset,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(conn: &C, name: &str, number: &str) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("contract name required".into()));
    }
    if number.trim().is_empty() {
        return Err(ModelError::Validation("contract number required".into()));
    }
    let existing = Entity::find()
        .filter(Column::Number.eq(number))
        .one(conn)
        .await
        .map_err(ModelError::db)?;
    if existing.is_some() {
        return Err(ModelError::Uniqueness(format!("contract number '{number}' already exists")));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        number: Set(number.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}
