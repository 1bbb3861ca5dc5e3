use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// User category from the upstream directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum UserKind {
    #[sea_orm(string_value = "department-manager")]
    #[serde(rename = "department-manager")]
    DepartmentManager,
    #[sea_orm(string_value = "employee")]
    #[serde(rename = "employee")]
    Employee,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_user_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity-provider user id; the auth system owns the base record.
    #[sea_orm(unique)]
    pub user_id: i64,
    pub name: String,
    pub token: Option<String>,
    pub kind: UserKind,
    pub business_unit_id: i64,
    pub email: String,
    pub mobile: String,
    pub employee_id: Option<String>,
    pub leader_id: Option<i64>,
    pub memo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::business_unit::Entity",
        from = "Column::BusinessUnitId",
        to = "super::business_unit::Column::Id"
    )]
    BusinessUnit,
    #[sea_orm(belongs_to = "Entity", from = "Column::LeaderId", to = "Column::Id")]
    Leader,
    #[sea_orm(has_many = "super::user_menus::Entity")]
    UserMenus,
}

impl Related<super::business_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessUnit.def()
    }
}

impl Related<super::user_menus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMenus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub struct NewUserProfile {
    pub user_id: i64,
    pub name: String,
    pub kind: UserKind,
    pub business_unit_id: i64,
    pub email: String,
    pub mobile: String,
    pub employee_id: Option<String>,
    pub leader_id: Option<i64>,
}

pub async fn create<C: ConnectionTrait>(conn: &C, new: NewUserProfile) -> Result<Model, ModelError> {
    if new.name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if !new.email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    let existing = Entity::find()
        .filter(Column::UserId.eq(new.user_id))
        .one(conn)
        .await
        .map_err(ModelError::db)?;
    if existing.is_some() {
        return Err(ModelError::Uniqueness(format!(
            "profile for user {} already exists",
            new.user_id
        )));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        user_id: Set(new.user_id),
        name: Set(new.name),
        kind: Set(new.kind),
        business_unit_id: Set(new.business_unit_id),
        email: Set(new.email),
        mobile: Set(new.mobile),
        employee_id: Set(new.employee_id),
        leader_id: Set(new.leader_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}
