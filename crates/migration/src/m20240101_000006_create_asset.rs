//! Create `cmdb_asset`, the root inventory table.
//!
//! Reference delete policies: contract/business-unit/IDC/room are SET NULL,
//! admin/proposer profiles are RESTRICT.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Asset::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Asset::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Asset::DeviceType, 64).not_null())
                    .col(string_len_null(Asset::Name, 30).unique_key())
                    .col(string_len(Asset::Sn, 128).unique_key().not_null())
                    .col(small_integer(Asset::Status).not_null())
                    .col(string_len(Asset::VirtualMachine, 64).not_null())
                    .col(string_len(Asset::Hostname, 128).unique_key().not_null())
                    .col(string_len_null(Asset::AssetOp, 64))
                    .col(big_integer_null(Asset::ContractId))
                    .col(date_null(Asset::TradeTime))
                    .col(date_null(Asset::ExpireTime))
                    .col(small_integer_null(Asset::RenewalWay))
                    .col(small_integer_null(Asset::PayWay))
                    .col(double_null(Asset::Price))
                    .col(big_integer_null(Asset::BusinessUnitId))
                    .col(string_len_null(Asset::Function, 64))
                    .col(string_len_null(Asset::Purpose, 200))
                    .col(big_integer_null(Asset::AdminId))
                    .col(big_integer_null(Asset::ProposerId))
                    .col(big_integer_null(Asset::IdcId))
                    .col(big_integer_null(Asset::IdcRoomId))
                    .col(string_len_null(Asset::Thick, 100))
                    .col(text_null(Asset::Description))
                    .col(timestamp_with_time_zone(Asset::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Asset::UpdatedAt).not_null())
                    .col(timestamp_with_time_zone_null(Asset::SetupAt))
                    .col(timestamp_with_time_zone_null(Asset::ApplyAt))
                    .col(string_len_null(Asset::Ratio, 16))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_contract")
                            .from(Asset::Table, Asset::ContractId)
                            .to(Contract::Table, Contract::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_business_unit")
                            .from(Asset::Table, Asset::BusinessUnitId)
                            .to(BusinessUnit::Table, BusinessUnit::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_admin")
                            .from(Asset::Table, Asset::AdminId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_proposer")
                            .from(Asset::Table, Asset::ProposerId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_idc")
                            .from(Asset::Table, Asset::IdcId)
                            .to(Idc::Table, Idc::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_idc_room")
                            .from(Asset::Table, Asset::IdcRoomId)
                            .to(IdcRoom::Table, IdcRoom::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Asset::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Asset {
    #[sea_orm(iden = "cmdb_asset")]
    Table,
    Id,
    DeviceType,
    Name,
    Sn,
    Status,
    VirtualMachine,
    Hostname,
    AssetOp,
    ContractId,
    TradeTime,
    ExpireTime,
    RenewalWay,
    PayWay,
    Price,
    BusinessUnitId,
    Function,
    Purpose,
    AdminId,
    ProposerId,
    IdcId,
    IdcRoomId,
    Thick,
    Description,
    CreatedAt,
    UpdatedAt,
    SetupAt,
    ApplyAt,
    Ratio,
}

#[derive(DeriveIden)]
enum Contract {
    #[sea_orm(iden = "cmdb_contract")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum BusinessUnit {
    #[sea_orm(iden = "cmdb_business_unit")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum UserProfile {
    #[sea_orm(iden = "cmdb_user_profile")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Idc {
    #[sea_orm(iden = "cmdb_idc")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum IdcRoom {
    #[sea_orm(iden = "cmdb_idc_room")]
    Table,
    Id,
}
