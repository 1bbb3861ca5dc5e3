//! Migrator registering entity-specific migrations in FK dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_contract;
mod m20240101_000002_create_idc;
mod m20240101_000003_create_business_unit;
mod m20240101_000004_create_user_profile;
mod m20240101_000005_create_tag;
mod m20240101_000006_create_asset;
mod m20240101_000007_create_asset_tag;
mod m20240101_000008_create_server;
mod m20240101_000009_create_network_devices;
mod m20240101_000010_create_org_units;
mod m20240101_000011_create_menus;
mod m20240101_000012_create_user_menus;
mod m20240101_000013_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_contract::Migration),
            Box::new(m20240101_000002_create_idc::Migration),
            Box::new(m20240101_000003_create_business_unit::Migration),
            Box::new(m20240101_000004_create_user_profile::Migration),
            Box::new(m20240101_000005_create_tag::Migration),
            Box::new(m20240101_000006_create_asset::Migration),
            Box::new(m20240101_000007_create_asset_tag::Migration),
            Box::new(m20240101_000008_create_server::Migration),
            Box::new(m20240101_000009_create_network_devices::Migration),
            Box::new(m20240101_000010_create_org_units::Migration),
            Box::new(m20240101_000011_create_menus::Migration),
            Box::new(m20240101_000012_create_user_menus::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000013_add_indexes::Migration),
        ]
    }
}
