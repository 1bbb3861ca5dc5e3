//! Asset lifecycle: creation, specialization consistency, resolution and
//! transactional deletion.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use chrono::Utc;
use tracing::info;

use configs::InventoryConfig;
use models::asset::{self, AssetStatus, DeviceType, NewAsset};
use models::errors::ModelError;
use models::server::{self, NewServer};
use models::{asset_tag, ddos, router, slb, switch, tag};

use crate::{errors::ServiceError, pagination::Pagination};

/// Concrete type-specific row for an asset, or `NotProvisioned` when none
/// exists yet (always the case for `database`/`others` assets).
#[derive(Debug, Clone, PartialEq)]
pub enum Specialization {
    Server(server::Model),
    Switch(switch::Model),
    Slb(slb::Model),
    Router(router::Model),
    Ddos(ddos::Model),
    NotProvisioned,
}

/// The declared device type must agree with the specialization being written.
fn check_device_type(asset: &asset::Model, expected: DeviceType) -> Result<(), ModelError> {
    if asset.device_type != expected {
        return Err(ModelError::Mismatch(format!(
            "asset {} is declared {:?}, cannot attach a {:?} specialization",
            asset.id, asset.device_type, expected
        )));
    }
    Ok(())
}

/// Create a new asset. `function` is validated against the configured
/// catalogue.
pub async fn create_asset(
    db: &DatabaseConnection,
    cfg: &InventoryConfig,
    new: NewAsset,
) -> Result<asset::Model, ServiceError> {
    if let Some(function) = new.function.as_deref() {
        if !cfg.is_valid_function(function) {
            return Err(ServiceError::Validation(format!("unknown function '{function}'")));
        }
    }
    let created = asset::create(db, new).await?;
    info!(asset_id = created.id, sn = %created.sn, "asset created");
    Ok(created)
}

async fn ensure_not_provisioned(db: &impl sea_orm::ConnectionTrait, asset: &asset::Model) -> Result<(), ServiceError> {
    if resolve_on(db, asset).await? != Specialization::NotProvisioned {
        return Err(ServiceError::Model(ModelError::Uniqueness(format!(
            "asset {} already has a specialization",
            asset.id
        ))));
    }
    Ok(())
}

/// Attach the server specialization to an existing asset.
pub async fn create_server(
    db: &DatabaseConnection,
    asset_id: i64,
    new: NewServer,
) -> Result<server::Model, ServiceError> {
    let asset = get_asset(db, asset_id).await?.ok_or_else(|| ServiceError::not_found("asset"))?;
    check_device_type(&asset, DeviceType::Server)?;
    ensure_not_provisioned(db, &asset).await?;
    Ok(server::create(db, asset_id, new).await?)
}

pub async fn create_switch(db: &DatabaseConnection, asset_id: i64) -> Result<switch::Model, ServiceError> {
    let asset = get_asset(db, asset_id).await?.ok_or_else(|| ServiceError::not_found("asset"))?;
    check_device_type(&asset, DeviceType::Switch)?;
    ensure_not_provisioned(db, &asset).await?;
    Ok(switch::create(db, asset_id).await?)
}

pub async fn create_slb(db: &DatabaseConnection, asset_id: i64) -> Result<slb::Model, ServiceError> {
    let asset = get_asset(db, asset_id).await?.ok_or_else(|| ServiceError::not_found("asset"))?;
    check_device_type(&asset, DeviceType::Slb)?;
    ensure_not_provisioned(db, &asset).await?;
    Ok(slb::create(db, asset_id).await?)
}

pub async fn create_router(db: &DatabaseConnection, asset_id: i64) -> Result<router::Model, ServiceError> {
    let asset = get_asset(db, asset_id).await?.ok_or_else(|| ServiceError::not_found("asset"))?;
    check_device_type(&asset, DeviceType::Router)?;
    ensure_not_provisioned(db, &asset).await?;
    Ok(router::create(db, asset_id).await?)
}

pub async fn create_ddos(db: &DatabaseConnection, asset_id: i64) -> Result<ddos::Model, ServiceError> {
    let asset = get_asset(db, asset_id).await?.ok_or_else(|| ServiceError::not_found("asset"))?;
    check_device_type(&asset, DeviceType::Ddos)?;
    ensure_not_provisioned(db, &asset).await?;
    Ok(ddos::create(db, asset_id).await?)
}

/// Create an asset together with its server row in one transaction, so a
/// half-provisioned pair is never observable.
pub async fn create_asset_with_server(
    db: &DatabaseConnection,
    cfg: &InventoryConfig,
    new_asset: NewAsset,
    new_server: NewServer,
) -> Result<(asset::Model, server::Model), ServiceError> {
    if let Some(function) = new_asset.function.as_deref() {
        if !cfg.is_valid_function(function) {
            return Err(ServiceError::Validation(format!("unknown function '{function}'")));
        }
    }
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let a = asset::create(&txn, new_asset).await?;
    check_device_type(&a, DeviceType::Server)?;
    let s = server::create(&txn, a.id, new_server).await?;
    txn.commit().await.map_err(ServiceError::db)?;
    info!(asset_id = a.id, server_id = s.id, "asset provisioned with server");
    Ok((a, s))
}

async fn resolve_on(
    conn: &impl sea_orm::ConnectionTrait,
    asset: &asset::Model,
) -> Result<Specialization, ServiceError> {
    let found = match asset.device_type {
        DeviceType::Server => server::find_by_asset(conn, asset.id).await?.map(Specialization::Server),
        DeviceType::Switch => switch::find_by_asset(conn, asset.id).await?.map(Specialization::Switch),
        DeviceType::Slb => slb::find_by_asset(conn, asset.id).await?.map(Specialization::Slb),
        DeviceType::Router => router::find_by_asset(conn, asset.id).await?.map(Specialization::Router),
        DeviceType::Ddos => ddos::find_by_asset(conn, asset.id).await?.map(Specialization::Ddos),
        DeviceType::Database | DeviceType::Others => None,
    };
    Ok(found.unwrap_or(Specialization::NotProvisioned))
}

/// Resolve the concrete specialization row for an asset by its declared
/// device type.
pub async fn resolve_specialization(
    db: &DatabaseConnection,
    asset: &asset::Model,
) -> Result<Specialization, ServiceError> {
    resolve_on(db, asset).await
}

pub async fn get_asset(db: &impl sea_orm::ConnectionTrait, id: i64) -> Result<Option<asset::Model>, ServiceError> {
    asset::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)
}

pub async fn find_by_sn(db: &DatabaseConnection, sn: &str) -> Result<Option<asset::Model>, ServiceError> {
    Ok(asset::find_by_sn(db, sn).await?)
}

pub async fn update_status(
    db: &DatabaseConnection,
    id: i64,
    status: AssetStatus,
) -> Result<asset::Model, ServiceError> {
    let mut am: asset::ActiveModel = get_asset(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("asset"))?
        .into();
    am.status = Set(status);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ServiceError::db)
}

/// Delete an asset in one transaction: tag links, specialization row, then
/// the asset itself. Nothing orphaned remains on commit.
pub async fn delete_asset(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    get_asset(&txn, id).await?.ok_or_else(|| ServiceError::not_found("asset"))?;

    asset_tag::Entity::delete_many()
        .filter(asset_tag::Column::AssetId.eq(id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    // At most one of these holds a row; clearing all keeps the policy
    // observable even on backends without FK cascade.
    server::Entity::delete_many().filter(server::Column::AssetId.eq(id)).exec(&txn).await.map_err(ServiceError::db)?;
    switch::Entity::delete_many().filter(switch::Column::AssetId.eq(id)).exec(&txn).await.map_err(ServiceError::db)?;
    slb::Entity::delete_many().filter(slb::Column::AssetId.eq(id)).exec(&txn).await.map_err(ServiceError::db)?;
    router::Entity::delete_many().filter(router::Column::AssetId.eq(id)).exec(&txn).await.map_err(ServiceError::db)?;
    ddos::Entity::delete_many().filter(ddos::Column::AssetId.eq(id)).exec(&txn).await.map_err(ServiceError::db)?;
    asset::Entity::delete_by_id(id).exec(&txn).await.map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;
    info!(asset_id = id, "asset deleted with its specialization");
    Ok(())
}

/// Link a tag to an asset. A second identical link is a uniqueness violation.
pub async fn attach_tag(db: &DatabaseConnection, asset_id: i64, tag_id: i64) -> Result<(), ServiceError> {
    get_asset(db, asset_id).await?.ok_or_else(|| ServiceError::not_found("asset"))?;
    tag::Entity::find_by_id(tag_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("tag"))?;
    let existing = asset_tag::Entity::find_by_id((asset_id, tag_id))
        .one(db)
        .await
        .map_err(ServiceError::db)?;
    if existing.is_some() {
        return Err(ServiceError::Model(ModelError::Uniqueness(format!(
            "asset {asset_id} already carries tag {tag_id}"
        ))));
    }
    let am = asset_tag::ActiveModel { asset_id: Set(asset_id), tag_id: Set(tag_id) };
    am.insert(db).await.map_err(ServiceError::db)?;
    Ok(())
}

pub async fn detach_tag(db: &DatabaseConnection, asset_id: i64, tag_id: i64) -> Result<(), ServiceError> {
    asset_tag::Entity::delete_by_id((asset_id, tag_id))
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(())
}

pub async fn list_tags(db: &DatabaseConnection, asset: &asset::Model) -> Result<Vec<tag::Model>, ServiceError> {
    use sea_orm::ModelTrait;
    asset.find_related(tag::Entity).all(db).await.map_err(ServiceError::db)
}

pub async fn list_assets(
    db: &DatabaseConnection,
    device_type: Option<DeviceType>,
    opts: Pagination,
) -> Result<Vec<asset::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = asset::Entity::find().order_by_asc(asset::Column::Id);
    if let Some(dt) = device_type {
        query = query.filter(asset::Column::DeviceType.eq(dt));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(ServiceError::db)
}

/// Clear facility references when an IDC disappears; used by the inventory
/// delete path.
pub(crate) async fn detach_idc(
    txn: &sea_orm::DatabaseTransaction,
    idc_id: i64,
    room_ids: &[i64],
) -> Result<(), ServiceError> {
    asset::Entity::update_many()
        .col_expr(asset::Column::IdcId, Expr::value(Option::<i64>::None))
        .filter(asset::Column::IdcId.eq(idc_id))
        .exec(txn)
        .await
        .map_err(ServiceError::db)?;
    if !room_ids.is_empty() {
        asset::Entity::update_many()
            .col_expr(asset::Column::IdcRoomId, Expr::value(Option::<i64>::None))
            .filter(asset::Column::IdcRoomId.is_in(room_ids.to_vec()))
            .exec(txn)
            .await
            .map_err(ServiceError::db)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::asset::{AssetStatus, VirtualMachine};

    fn sample_asset(device_type: DeviceType) -> asset::Model {
        asset::Model {
            id: 7,
            device_type,
            name: None,
            sn: "SN007".into(),
            status: AssetStatus::Running,
            virtual_machine: VirtualMachine::Physical,
            hostname: "h7".into(),
            asset_op: None,
            contract_id: None,
            trade_time: None,
            expire_time: None,
            renewal_way: None,
            pay_way: None,
            price: None,
            business_unit_id: None,
            function: None,
            purpose: None,
            admin_id: None,
            proposer_id: None,
            idc_id: None,
            idc_room_id: None,
            thick: None,
            description: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            setup_at: None,
            apply_at: None,
            ratio: None,
        }
    }

    #[test]
    fn matching_device_type_accepted() {
        let a = sample_asset(DeviceType::Server);
        assert!(check_device_type(&a, DeviceType::Server).is_ok());
    }

    #[test]
    fn mismatched_device_type_rejected() {
        let a = sample_asset(DeviceType::Switch);
        let err = check_device_type(&a, DeviceType::Server).unwrap_err();
        assert!(matches!(err, ModelError::Mismatch(_)));
    }
}
