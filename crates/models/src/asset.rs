//! Root inventory record. Every physical or virtual resource has exactly one
//! asset row; type-specific detail lives in the 1:1 specialization tables.
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Closed device taxonomy. `Database` and `Others` carry no specialization
/// table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(64))")]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    #[sea_orm(string_value = "server")]
    Server,
    #[sea_orm(string_value = "switch")]
    Switch,
    #[sea_orm(string_value = "router")]
    Router,
    #[sea_orm(string_value = "ddos")]
    Ddos,
    #[sea_orm(string_value = "database")]
    Database,
    #[sea_orm(string_value = "slb")]
    Slb,
    #[sea_orm(string_value = "others")]
    Others,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum AssetStatus {
    #[default]
    #[sea_orm(num_value = 0)]
    Running,
    #[sea_orm(num_value = 1)]
    Stopped,
    #[sea_orm(num_value = 2)]
    Expired,
    #[sea_orm(num_value = 3)]
    ExpiringSoon,
    #[sea_orm(num_value = 4)]
    Starting,
    #[sea_orm(num_value = 5)]
    Stopping,
    #[sea_orm(num_value = 6)]
    Locked,
    #[sea_orm(num_value = 7)]
    PendingRelease,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum PayWay {
    #[sea_orm(num_value = 0)]
    Prepaid,
    #[sea_orm(num_value = 1)]
    OnDemand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum RenewalWay {
    #[sea_orm(num_value = 0)]
    Manual,
    #[sea_orm(num_value = 1)]
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(64))")]
#[serde(rename_all = "lowercase")]
pub enum VirtualMachine {
    #[default]
    #[sea_orm(string_value = "physical")]
    Physical,
    #[sea_orm(string_value = "tencent")]
    Tencent,
    #[sea_orm(string_value = "aliyun")]
    Aliyun,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cmdb_asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub device_type: DeviceType,
    #[sea_orm(unique)]
    pub name: Option<String>,
    /// Serial number; equivalent to the provider instance id.
    #[sea_orm(unique)]
    pub sn: String,
    pub status: AssetStatus,
    pub virtual_machine: VirtualMachine,
    #[sea_orm(unique)]
    pub hostname: String,
    pub asset_op: Option<String>,
    pub contract_id: Option<i64>,
    pub trade_time: Option<Date>,
    pub expire_time: Option<Date>,
    pub renewal_way: Option<RenewalWay>,
    pub pay_way: Option<PayWay>,
    pub price: Option<f64>,
    pub business_unit_id: Option<i64>,
    /// Validated against the configured function catalogue at create time.
    pub function: Option<String>,
    pub purpose: Option<String>,
    pub admin_id: Option<i64>,
    pub proposer_id: Option<i64>,
    pub idc_id: Option<i64>,
    pub idc_room_id: Option<i64>,
    pub thick: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub setup_at: Option<DateTimeWithTimeZone>,
    pub apply_at: Option<DateTimeWithTimeZone>,
    pub ratio: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contract::Entity",
        from = "Column::ContractId",
        to = "super::contract::Column::Id"
    )]
    Contract,
    #[sea_orm(
        belongs_to = "super::business_unit::Entity",
        from = "Column::BusinessUnitId",
        to = "super::business_unit::Column::Id"
    )]
    BusinessUnit,
    #[sea_orm(
        belongs_to = "super::idc::Entity",
        from = "Column::IdcId",
        to = "super::idc::Column::Id"
    )]
    Idc,
    #[sea_orm(
        belongs_to = "super::idc_room::Entity",
        from = "Column::IdcRoomId",
        to = "super::idc_room::Column::Id"
    )]
    IdcRoom,
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::AdminId",
        to = "super::user_profile::Column::Id"
    )]
    Admin,
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::ProposerId",
        to = "super::user_profile::Column::Id"
    )]
    Proposer,
    #[sea_orm(has_one = "super::server::Entity")]
    Server,
    #[sea_orm(has_one = "super::switch::Entity")]
    Switch,
    #[sea_orm(has_one = "super::slb::Entity")]
    Slb,
    #[sea_orm(has_one = "super::router::Entity")]
    Router,
    #[sea_orm(has_one = "super::ddos::Entity")]
    Ddos,
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::business_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessUnit.def()
    }
}

impl Related<super::idc::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Idc.def()
    }
}

impl Related<super::server::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Server.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::asset_tag::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::asset_tag::Relation::Asset.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields accepted at asset creation; everything else defaults.
#[derive(Debug, Default)]
pub struct NewAsset {
    pub device_type: DeviceType,
    pub name: Option<String>,
    pub sn: String,
    pub hostname: String,
    pub status: AssetStatus,
    pub virtual_machine: VirtualMachine,
    pub contract_id: Option<i64>,
    pub business_unit_id: Option<i64>,
    pub idc_id: Option<i64>,
    pub idc_room_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub proposer_id: Option<i64>,
    pub trade_time: Option<Date>,
    pub expire_time: Option<Date>,
    pub renewal_way: Option<RenewalWay>,
    pub pay_way: Option<PayWay>,
    pub price: Option<f64>,
    pub function: Option<String>,
    pub purpose: Option<String>,
    pub description: Option<String>,
}

pub async fn create<C: ConnectionTrait>(conn: &C, new: NewAsset) -> Result<Model, ModelError> {
    if new.sn.trim().is_empty() {
        return Err(ModelError::Validation("sn required".into()));
    }
    if new.hostname.trim().is_empty() {
        return Err(ModelError::Validation("hostname required".into()));
    }
    if Entity::find().filter(Column::Sn.eq(new.sn.as_str())).one(conn).await.map_err(ModelError::db)?.is_some() {
        return Err(ModelError::Uniqueness(format!("sn '{}' already exists", new.sn)));
    }
    if Entity::find()
        .filter(Column::Hostname.eq(new.hostname.as_str()))
        .one(conn)
        .await
        .map_err(ModelError::db)?
        .is_some()
    {
        return Err(ModelError::Uniqueness(format!("hostname '{}' already exists", new.hostname)));
    }
    if let Some(name) = new.name.as_deref() {
        if Entity::find().filter(Column::Name.eq(name)).one(conn).await.map_err(ModelError::db)?.is_some() {
            return Err(ModelError::Uniqueness(format!("asset name '{name}' already exists")));
        }
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        device_type: Set(new.device_type),
        name: Set(new.name),
        sn: Set(new.sn),
        status: Set(new.status),
        virtual_machine: Set(new.virtual_machine),
        hostname: Set(new.hostname),
        contract_id: Set(new.contract_id),
        trade_time: Set(new.trade_time),
        expire_time: Set(new.expire_time),
        renewal_way: Set(new.renewal_way),
        pay_way: Set(new.pay_way),
        price: Set(new.price),
        business_unit_id: Set(new.business_unit_id),
        function: Set(new.function),
        purpose: Set(new.purpose),
        admin_id: Set(new.admin_id),
        proposer_id: Set(new.proposer_id),
        idc_id: Set(new.idc_id),
        idc_room_id: Set(new.idc_room_id),
        description: Set(new.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(conn).await.map_err(ModelError::db)
}

pub async fn find_by_sn<C: ConnectionTrait>(conn: &C, sn: &str) -> Result<Option<Model>, ModelError> {
    Entity::find().filter(Column::Sn.eq(sn)).one(conn).await.map_err(ModelError::db)
}
