//! Supporting inventory records: sites, rooms, contracts, tags, and
//! organizational units, plus the delete policies that keep asset rows
//! consistent when a referenced record goes away.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};
use sea_orm::sea_query::Expr;
use tracing::info;

use models::errors::ModelError;
use models::{
    asset, asset_tag, business_unit, business_unit_ops, contract, domain, idc, idc_room,
    product_unit, tag, user_profile,
};

use crate::asset_service;
use crate::errors::ServiceError;

pub async fn create_idc(
    db: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
) -> Result<idc::Model, ServiceError> {
    Ok(idc::create(db, name, description).await?)
}

pub async fn create_idc_room(
    db: &DatabaseConnection,
    idc_id: i64,
    name: &str,
) -> Result<idc_room::Model, ServiceError> {
    idc::Entity::find_by_id(idc_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("idc"))?;
    Ok(idc_room::create(db, idc_id, name).await?)
}

pub async fn create_contract(
    db: &DatabaseConnection,
    name: &str,
    number: &str,
) -> Result<contract::Model, ServiceError> {
    Ok(contract::create(db, name, number).await?)
}

pub async fn create_tag(
    db: &DatabaseConnection,
    name: &str,
    creator_id: Option<i64>,
) -> Result<tag::Model, ServiceError> {
    if let Some(creator) = creator_id {
        user_profile::Entity::find_by_id(creator)
            .one(db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("creator profile"))?;
    }
    Ok(tag::create(db, name, creator_id).await?)
}

pub async fn create_business_unit(
    db: &DatabaseConnection,
    name: &str,
    owners: Option<&str>,
) -> Result<business_unit::Model, ServiceError> {
    Ok(business_unit::create(db, name, owners).await?)
}

pub async fn create_product_unit(
    db: &DatabaseConnection,
    name: &str,
    business_unit_id: Option<i64>,
) -> Result<product_unit::Model, ServiceError> {
    if let Some(bu) = business_unit_id {
        business_unit::Entity::find_by_id(bu)
            .one(db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("business unit"))?;
    }
    Ok(product_unit::create(db, name, business_unit_id).await?)
}

pub async fn create_domain(
    db: &DatabaseConnection,
    name: &str,
    business_unit_id: Option<i64>,
) -> Result<domain::Model, ServiceError> {
    if let Some(bu) = business_unit_id {
        business_unit::Entity::find_by_id(bu)
            .one(db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("business unit"))?;
    }
    Ok(domain::create(db, name, business_unit_id).await?)
}

/// Delete a site. Assets placed there lose their site and room pointers but
/// survive; the site's rooms are removed with it.
pub async fn delete_idc(db: &DatabaseConnection, idc_id: i64) -> Result<(), ServiceError> {
    idc::Entity::find_by_id(idc_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("idc"))?;
    let room_ids: Vec<i64> = idc_room::Entity::find()
        .filter(idc_room::Column::IdcId.eq(idc_id))
        .all(db)
        .await
        .map_err(ServiceError::db)?
        .into_iter()
        .map(|r| r.id)
        .collect();

    let txn = db.begin().await.map_err(ServiceError::db)?;
    asset_service::detach_idc(&txn, idc_id, &room_ids).await?;
    idc_room::Entity::delete_many()
        .filter(idc_room::Column::IdcId.eq(idc_id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    idc::Entity::delete_by_id(idc_id).exec(&txn).await.map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;
    info!(idc_id, rooms = room_ids.len(), "idc deleted");
    Ok(())
}

/// Delete a contract, detaching any assets bought under it first.
pub async fn delete_contract(db: &DatabaseConnection, contract_id: i64) -> Result<(), ServiceError> {
    contract::Entity::find_by_id(contract_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("contract"))?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    asset::Entity::update_many()
        .col_expr(asset::Column::ContractId, Expr::value(Option::<i64>::None))
        .filter(asset::Column::ContractId.eq(contract_id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    contract::Entity::delete_by_id(contract_id)
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;
    info!(contract_id, "contract deleted");
    Ok(())
}

/// Delete a tag, unlinking it from every asset.
pub async fn delete_tag(db: &DatabaseConnection, tag_id: i64) -> Result<(), ServiceError> {
    tag::Entity::find_by_id(tag_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("tag"))?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    asset_tag::Entity::delete_many()
        .filter(asset_tag::Column::TagId.eq(tag_id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    tag::Entity::delete_by_id(tag_id).exec(&txn).await.map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;
    info!(tag_id, "tag deleted");
    Ok(())
}

/// Delete a business unit. Profiles protect it; assets, product units, and
/// domains merely lose the pointer, and ops-contact links are cleared.
pub async fn delete_business_unit(
    db: &DatabaseConnection,
    business_unit_id: i64,
) -> Result<(), ServiceError> {
    business_unit::Entity::find_by_id(business_unit_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("business unit"))?;
    let profile_refs = user_profile::Entity::find()
        .filter(user_profile::Column::BusinessUnitId.eq(business_unit_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    if profile_refs > 0 {
        return Err(ServiceError::Model(ModelError::ReferentialIntegrity(format!(
            "business unit {business_unit_id} still has {profile_refs} user profiles"
        ))));
    }

    let txn = db.begin().await.map_err(ServiceError::db)?;
    asset::Entity::update_many()
        .col_expr(asset::Column::BusinessUnitId, Expr::value(Option::<i64>::None))
        .filter(asset::Column::BusinessUnitId.eq(business_unit_id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    product_unit::Entity::update_many()
        .col_expr(product_unit::Column::BusinessUnitId, Expr::value(Option::<i64>::None))
        .filter(product_unit::Column::BusinessUnitId.eq(business_unit_id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    domain::Entity::update_many()
        .col_expr(domain::Column::BusinessUnitId, Expr::value(Option::<i64>::None))
        .filter(domain::Column::BusinessUnitId.eq(business_unit_id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    business_unit_ops::Entity::delete_many()
        .filter(business_unit_ops::Column::BusinessUnitId.eq(business_unit_id))
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    business_unit::Entity::delete_by_id(business_unit_id)
        .exec(&txn)
        .await
        .map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;
    info!(business_unit_id, "business unit deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_service;
    use crate::test_support::{run_tag, try_db};
    use models::asset::{DeviceType, NewAsset};

    #[tokio::test]
    async fn contract_delete_detaches_assets() -> anyhow::Result<()> {
        let db = match try_db().await {
            Some(db) => db,
            None => return Ok(()),
        };
        let tag = run_tag();
        let cfg = configs::InventoryConfig::default();
        let contract = create_contract(&db, &format!("contract-{tag}"), &format!("C-{tag}")).await?;
        let asset = asset_service::create_asset(
            &db,
            &cfg,
            NewAsset {
                device_type: DeviceType::Others,
                sn: format!("SN-c-{tag}"),
                hostname: format!("host-c-{tag}"),
                contract_id: Some(contract.id),
                ..Default::default()
            },
        )
        .await?;

        delete_contract(&db, contract.id).await?;

        let asset = asset_service::get_asset(&db, asset.id)
            .await?
            .expect("asset survives contract deletion");
        assert_eq!(asset.contract_id, None);
        asset_service::delete_asset(&db, asset.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn tag_delete_unlinks_assets() -> anyhow::Result<()> {
        let db = match try_db().await {
            Some(db) => db,
            None => return Ok(()),
        };
        let run = run_tag();
        let cfg = configs::InventoryConfig::default();
        let label = create_tag(&db, &format!("tag-{run}"), None).await?;
        let asset = asset_service::create_asset(
            &db,
            &cfg,
            NewAsset {
                device_type: DeviceType::Others,
                sn: format!("SN-t-{run}"),
                hostname: format!("host-t-{run}"),
                ..Default::default()
            },
        )
        .await?;
        asset_service::attach_tag(&db, asset.id, label.id).await?;

        delete_tag(&db, label.id).await?;

        let asset = asset_service::get_asset(&db, asset.id).await?.expect("asset stays");
        let tags = asset_service::list_tags(&db, &asset).await?;
        assert!(tags.is_empty());
        asset_service::delete_asset(&db, asset.id).await?;
        Ok(())
    }
}
