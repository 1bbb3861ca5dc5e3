//! Join table linking business units to their ops-contact profiles.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_business_unit_ops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub business_unit_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_profile_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::business_unit::Entity",
        from = "Column::BusinessUnitId",
        to = "super::business_unit::Column::Id"
    )]
    BusinessUnit,
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::UserProfileId",
        to = "super::user_profile::Column::Id"
    )]
    UserProfile,
}

impl ActiveModelBehavior for ActiveModel {}
