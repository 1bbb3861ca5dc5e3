use anyhow::Result;
use sea_orm::EntityTrait;
use uuid::Uuid;

use super::setup_test_db;
use crate::errors::ModelError;
use crate::{asset, idc, server, tag};

#[tokio::test]
async fn test_asset_crud_and_uniqueness() -> Result<()> {
    let db = match setup_test_db().await {
        Some(db) => db,
        None => return Ok(()),
    };

    let suffix = Uuid::new_v4();
    let created = asset::create(
        &db,
        asset::NewAsset {
            sn: format!("SN-{suffix}"),
            hostname: format!("host-{suffix}"),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(created.device_type, asset::DeviceType::Server);
    assert_eq!(created.status, asset::AssetStatus::Running);

    // Read back by id and by sn
    let found = asset::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    let by_sn = asset::find_by_sn(&db, &created.sn).await?;
    assert_eq!(by_sn.map(|a| a.id), Some(created.id));

    // Duplicate sn rejected
    let dup_sn = asset::create(
        &db,
        asset::NewAsset {
            sn: created.sn.clone(),
            hostname: format!("other-{suffix}"),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(dup_sn, Err(ModelError::Uniqueness(_))));

    // Duplicate hostname rejected
    let dup_host = asset::create(
        &db,
        asset::NewAsset {
            sn: format!("SN2-{suffix}"),
            hostname: created.hostname.clone(),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(dup_host, Err(ModelError::Uniqueness(_))));

    asset::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_asset_delete_cascades_server() -> Result<()> {
    let db = match setup_test_db().await {
        Some(db) => db,
        None => return Ok(()),
    };

    let suffix = Uuid::new_v4();
    let a = asset::create(
        &db,
        asset::NewAsset {
            sn: format!("SN-{suffix}"),
            hostname: format!("host-{suffix}"),
            ..Default::default()
        },
    )
    .await?;
    let s = server::create(&db, a.id, server::NewServer { cpu: 4, memory: 8, ..Default::default() })
        .await?;

    assert_eq!(server::find_by_asset(&db, a.id).await?.map(|m| m.id), Some(s.id));

    // FK is ON DELETE CASCADE; no orphaned specialization may remain
    asset::Entity::delete_by_id(a.id).exec(&db).await?;
    assert!(server::find_by_asset(&db, a.id).await?.is_none());
    assert!(server::Entity::find_by_id(s.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_tag_and_idc_uniqueness() -> Result<()> {
    let db = match setup_test_db().await {
        Some(db) => db,
        None => return Ok(()),
    };

    let name = format!("tag-{}", Uuid::new_v4());
    let t = tag::create(&db, &name, None).await?;
    let dup = tag::create(&db, &name, None).await;
    assert!(matches!(dup, Err(ModelError::Uniqueness(_))));
    tag::Entity::delete_by_id(t.id).exec(&db).await?;

    let idc_name = format!("idc-{}", Uuid::new_v4());
    let i = idc::create(&db, &idc_name, Some("east wing")).await?;
    let dup = idc::create(&db, &idc_name, None).await;
    assert!(matches!(dup, Err(ModelError::Uniqueness(_))));
    idc::Entity::delete_by_id(i.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_server_validation() -> Result<()> {
    let db = match setup_test_db().await {
        Some(db) => db,
        None => return Ok(()),
    };

    let suffix = Uuid::new_v4();
    let a = asset::create(
        &db,
        asset::NewAsset {
            sn: format!("SN-{suffix}"),
            hostname: format!("host-{suffix}"),
            ..Default::default()
        },
    )
    .await?;

    let bad = server::create(&db, a.id, server::NewServer { cpu: 0, memory: 8, ..Default::default() }).await;
    assert!(matches!(bad, Err(ModelError::Validation(_))));

    asset::Entity::delete_by_id(a.id).exec(&db).await?;
    Ok(())
}
