use anyhow::Result;
use sea_orm::{EntityTrait, TransactionTrait};
use uuid::Uuid;

use super::setup_test_db;
use crate::{asset, server};

/// An asset plus its specialization commit together.
#[tokio::test]
async fn test_asset_with_server_commits_atomically() -> Result<()> {
    let db = match setup_test_db().await {
        Some(db) => db,
        None => return Ok(()),
    };

    let suffix = Uuid::new_v4();
    let txn = db.begin().await?;
    let a = asset::create(
        &txn,
        asset::NewAsset {
            sn: format!("SN-{suffix}"),
            hostname: format!("host-{suffix}"),
            ..Default::default()
        },
    )
    .await?;
    let s = server::create(&txn, a.id, server::NewServer { cpu: 2, memory: 4, ..Default::default() })
        .await?;
    txn.commit().await?;

    assert!(asset::Entity::find_by_id(a.id).one(&db).await?.is_some());
    assert!(server::Entity::find_by_id(s.id).one(&db).await?.is_some());

    asset::Entity::delete_by_id(a.id).exec(&db).await?;
    Ok(())
}

/// Rollback leaves neither the asset nor the specialization observable.
#[tokio::test]
async fn test_partial_create_rolls_back() -> Result<()> {
    let db = match setup_test_db().await {
        Some(db) => db,
        None => return Ok(()),
    };

    let suffix = Uuid::new_v4();
    let sn = format!("SN-{suffix}");
    let txn = db.begin().await?;
    let a = asset::create(
        &txn,
        asset::NewAsset {
            sn: sn.clone(),
            hostname: format!("host-{suffix}"),
            ..Default::default()
        },
    )
    .await?;
    server::create(&txn, a.id, server::NewServer { cpu: 2, memory: 4, ..Default::default() }).await?;
    txn.rollback().await?;

    assert!(asset::find_by_sn(&db, &sn).await?.is_none());
    Ok(())
}

/// A duplicate sn inside the transaction aborts the whole operation.
#[tokio::test]
async fn test_duplicate_sn_aborts_transaction() -> Result<()> {
    let db = match setup_test_db().await {
        Some(db) => db,
        None => return Ok(()),
    };

    let suffix = Uuid::new_v4();
    let sn = format!("SN-{suffix}");
    let existing = asset::create(
        &db,
        asset::NewAsset {
            sn: sn.clone(),
            hostname: format!("host-{suffix}"),
            ..Default::default()
        },
    )
    .await?;

    let result = async {
        let txn = db.begin().await?;
        asset::create(
            &txn,
            asset::NewAsset {
                sn: sn.clone(),
                hostname: format!("host2-{suffix}"),
                ..Default::default()
            },
        )
        .await?;
        txn.commit().await?;
        Ok::<(), anyhow::Error>(())
    }
    .await;
    assert!(result.is_err());

    asset::Entity::delete_by_id(existing.id).exec(&db).await?;
    Ok(())
}
