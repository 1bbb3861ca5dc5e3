//! End-to-end scenarios exercising the service layer against a live
//! database. Each test skips cleanly when no database is reachable.

use sea_orm::DatabaseConnection;

use migration::MigratorTrait;
use models::asset::{DeviceType, NewAsset};
use models::server::NewServer;
use models::user_profile::{NewUserProfile, UserKind};
use service::asset_service::{self, Specialization};
use service::errors::ServiceError;
use service::{inventory_service, org_service, permission_service};

async fn try_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match models::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {e}");
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {e}");
        return None;
    }
    Some(db)
}

fn run_tag() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn server_asset(tag: &str, n: u32) -> NewAsset {
    NewAsset {
        device_type: DeviceType::Server,
        sn: format!("SN-{tag}-{n}"),
        hostname: format!("host-{tag}-{n}"),
        ..Default::default()
    }
}

fn small_server() -> NewServer {
    NewServer { cpu: 4, memory: 8192, ..Default::default() }
}

#[tokio::test]
async fn asset_provisioning_lifecycle() -> anyhow::Result<()> {
    let db = match try_db().await {
        Some(db) => db,
        None => return Ok(()),
    };
    let tag = run_tag();
    let cfg = configs::InventoryConfig::default();

    let asset = asset_service::create_asset(&db, &cfg, server_asset(&tag, 1)).await?;
    let server = asset_service::create_server(&db, asset.id, small_server()).await?;
    assert_eq!(server.asset_id, asset.id);

    // declared type must match the specialization being written
    let err = asset_service::create_switch(&db, asset.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Model(models::errors::ModelError::Mismatch(_))));

    // a second specialization for the same asset is rejected
    let err = asset_service::create_server(&db, asset.id, small_server()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Model(models::errors::ModelError::Uniqueness(_))));

    let resolved = asset_service::resolve_specialization(&db, &asset).await?;
    assert_eq!(resolved, Specialization::Server(server));

    asset_service::delete_asset(&db, asset.id).await?;
    assert!(asset_service::get_asset(&db, asset.id).await?.is_none());
    assert!(models::server::find_by_asset(&db, asset.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn permission_overlay_and_inactive_menu() -> anyhow::Result<()> {
    let db = match try_db().await {
        Some(db) => db,
        None => return Ok(()),
    };
    let tag = run_tag();

    let bu = inventory_service::create_business_unit(&db, &format!("bu-{tag}"), None).await?;
    let profile = org_service::create_user_profile(
        &db,
        NewUserProfile {
            user_id: 500_000 + rand_id(),
            name: format!("user-{tag}"),
            kind: UserKind::Employee,
            business_unit_id: bu.id,
            email: format!("{tag}@example.com"),
            mobile: "000".into(),
            employee_id: None,
            leader_id: None,
        },
    )
    .await?;

    let menu = permission_service::create_menu(
        &db,
        models::menus::NewMenu {
            name: format!("menu-{tag}"),
            can_get: true,
            is_active: true,
            ..Default::default()
        },
    )
    .await?;

    let eff = permission_service::effective_permissions(&db, profile.id, menu.id).await?;
    assert!(eff.get && !eff.post);

    let flags = permission_service::PermissionSet { get: false, post: true, put: false, delete: false };
    permission_service::set_override(&db, profile.id, menu.id, flags, None).await?;
    let eff = permission_service::effective_permissions(&db, profile.id, menu.id).await?;
    assert_eq!(eff, flags);

    // upsert keeps the pair unique
    permission_service::set_override(&db, profile.id, menu.id, flags, Some("again")).await?;

    let inactive = permission_service::create_menu(
        &db,
        models::menus::NewMenu {
            name: format!("menu-off-{tag}"),
            can_get: true,
            is_active: false,
            ..Default::default()
        },
    )
    .await?;
    let eff = permission_service::effective_permissions(&db, profile.id, inactive.id).await?;
    assert_eq!(eff, permission_service::PermissionSet::DENY);

    permission_service::clear_override(&db, profile.id, menu.id).await?;
    permission_service::delete_menu(&db, menu.id).await?;
    permission_service::delete_menu(&db, inactive.id).await?;
    org_service::delete_user_profile(&db, profile.id).await?;
    inventory_service::delete_business_unit(&db, bu.id).await?;
    Ok(())
}

#[tokio::test]
async fn mutual_leadership_is_rejected() -> anyhow::Result<()> {
    let db = match try_db().await {
        Some(db) => db,
        None => return Ok(()),
    };
    let tag = run_tag();
    let bu = inventory_service::create_business_unit(&db, &format!("bu-lead-{tag}"), None).await?;
    let mk = |n: &str| NewUserProfile {
        user_id: 600_000 + rand_id(),
        name: format!("{n}-{tag}"),
        kind: UserKind::Employee,
        business_unit_id: bu.id,
        email: format!("{n}-{tag}@example.com"),
        mobile: "000".into(),
        employee_id: None,
        leader_id: None,
    };
    let alpha = org_service::create_user_profile(&db, mk("alpha")).await?;
    let beta = org_service::create_user_profile(&db, mk("beta")).await?;

    org_service::assign_leader(&db, alpha.id, Some(beta.id)).await?;
    let err = org_service::assign_leader(&db, beta.id, Some(alpha.id)).await.unwrap_err();
    assert!(err.is_cycle());

    let chain = org_service::reporting_chain(&db, alpha.id).await?;
    assert_eq!(chain.iter().map(|p| p.id).collect::<Vec<_>>(), vec![alpha.id, beta.id]);

    org_service::assign_leader(&db, alpha.id, None).await?;
    org_service::delete_user_profile(&db, alpha.id).await?;
    org_service::delete_user_profile(&db, beta.id).await?;
    inventory_service::delete_business_unit(&db, bu.id).await?;
    Ok(())
}

#[tokio::test]
async fn idc_delete_detaches_assets() -> anyhow::Result<()> {
    let db = match try_db().await {
        Some(db) => db,
        None => return Ok(()),
    };
    let tag = run_tag();
    let cfg = configs::InventoryConfig::default();

    let idc = inventory_service::create_idc(&db, &format!("idc-{tag}"), None).await?;
    let room = inventory_service::create_idc_room(&db, idc.id, "r1").await?;
    let mut new = server_asset(&tag, 2);
    new.idc_id = Some(idc.id);
    new.idc_room_id = Some(room.id);
    let asset = asset_service::create_asset(&db, &cfg, new).await?;

    inventory_service::delete_idc(&db, idc.id).await?;

    let asset = asset_service::get_asset(&db, asset.id)
        .await?
        .expect("asset survives idc deletion");
    assert_eq!(asset.idc_id, None);
    assert_eq!(asset.idc_room_id, None);

    asset_service::delete_asset(&db, asset.id).await?;
    Ok(())
}

fn rand_id() -> i64 {
    (uuid::Uuid::new_v4().as_u128() % 100_000) as i64
}
