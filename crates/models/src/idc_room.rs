use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_idc_room")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub idc_id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::idc::Entity",
        from = "Column::IdcId",
        to = "super::idc::Column::Id"
    )]
    Idc,
}

impl Related<super::idc::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Idc.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(conn: &C, idc_id: i64, name: &str) -> Result<Model, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("room name required".into()));
    }
    let am = ActiveModel {
        idc_id: Set(idc_id),
        name: Set(name.to_string()),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}
