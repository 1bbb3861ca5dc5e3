//! Create `cmdb_server`, the server specialization.
//!
//! One row per asset; removed with the owning asset (CASCADE).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Server::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Server::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(Server::AssetId).unique_key().not_null())
                    .col(small_integer(Server::SubAssetType).not_null())
                    .col(string_len(Server::CreatedBy, 32).not_null())
                    .col(string_len_null(Server::ServerId, 100))
                    .col(string_len_null(Server::ImageId, 100))
                    .col(string_len_null(Server::ServerArea, 100))
                    .col(string_len_null(Server::ServerName, 50))
                    .col(integer(Server::Cpu).not_null())
                    .col(integer(Server::Memory).not_null())
                    .col(integer_null(Server::Capacity))
                    .col(string_len_null(Server::InstanceType, 100))
                    .col(string_len_null(Server::Os, 100))
                    .col(string_len_null(Server::PublicIp, 100))
                    .col(string_len_null(Server::PrivateIp, 100))
                    .col(integer_null(Server::Port))
                    .col(string_len_null(Server::Username, 32))
                    .col(string_len_null(Server::Password, 32))
                    .col(text_null(Server::Description))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_asset")
                            .from(Server::Table, Server::AssetId)
                            .to(Asset::Table, Asset::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Server::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Server {
    #[sea_orm(iden = "cmdb_server")]
    Table,
    Id,
    AssetId,
    SubAssetType,
    CreatedBy,
    ServerId,
    ImageId,
    ServerArea,
    ServerName,
    Cpu,
    Memory,
    Capacity,
    InstanceType,
    Os,
    PublicIp,
    PrivateIp,
    Port,
    Username,
    Password,
    Description,
}

#[derive(DeriveIden)]
enum Asset {
    #[sea_orm(iden = "cmdb_asset")]
    Table,
    Id,
}
