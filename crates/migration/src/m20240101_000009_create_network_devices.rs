//! Create the thin specializations: `cmdb_switch`, `cmdb_slb`, `cmdb_router`,
//! `cmdb_ddos`. Each is a unique 1:1 extension of an asset, CASCADE on delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const TABLES: &[&str] = &["cmdb_switch", "cmdb_slb", "cmdb_router", "cmdb_ddos"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES {
            manager
                .create_table(
                    Table::create()
                        .table(Alias::new(*table))
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Device::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(big_integer(Device::AssetId).unique_key().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{}_asset", table.trim_start_matches("cmdb_")).as_str())
                                .from(Alias::new(*table), Device::AssetId)
                                .to(Asset::Table, Asset::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Device {
    Id,
    AssetId,
}

#[derive(DeriveIden)]
enum Asset {
    #[sea_orm(iden = "cmdb_asset")]
    Table,
    Id,
}
