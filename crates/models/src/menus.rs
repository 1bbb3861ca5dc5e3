//! Permission menu tree. `parent_id` forms a strict tree rooted at
//! null-parent nodes; siblings display in `(sort, id)` order.
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_menus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub url: Option<String>,
    pub can_get: bool,
    pub can_post: bool,
    pub can_put: bool,
    pub can_delete: bool,
    pub sort: i32,
    pub is_active: bool,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,
    #[sea_orm(has_many = "super::user_menus::Entity")]
    UserMenus,
}

impl Related<super::user_menus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMenus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Default)]
pub struct NewMenu {
    pub name: String,
    pub parent_id: Option<i64>,
    pub url: Option<String>,
    pub can_get: bool,
    pub can_post: bool,
    pub can_put: bool,
    pub can_delete: bool,
    pub sort: i32,
    pub is_active: bool,
    pub description: Option<String>,
}

pub async fn create<C: ConnectionTrait>(conn: &C, new: NewMenu) -> Result<Model, ModelError> {
    if new.name.trim().is_empty() {
        return Err(ModelError::Validation("menu name required".into()));
    }
    if let Some(parent_id) = new.parent_id {
        let parent = Entity::find_by_id(parent_id).one(conn).await.map_err(ModelError::db)?;
        if parent.is_none() {
            return Err(ModelError::NotFound(format!("parent menu {parent_id}")));
        }
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(new.name),
        parent_id: Set(new.parent_id),
        url: Set(new.url),
        can_get: Set(new.can_get),
        can_post: Set(new.can_post),
        can_put: Set(new.can_put),
        can_delete: Set(new.can_delete),
        sort: Set(new.sort),
        is_active: Set(new.is_active),
        description: Set(new.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}
