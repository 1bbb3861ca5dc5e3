//! Create `cmdb_idc` and `cmdb_idc_room` tables.
//!
//! Rooms belong to a facility and are dropped with it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Idc::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Idc::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Idc::Name, 64).unique_key().not_null())
                    .col(text_null(Idc::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IdcRoom::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IdcRoom::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(IdcRoom::IdcId).not_null())
                    .col(string_len(IdcRoom::Name, 64).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_idc_room_idc")
                            .from(IdcRoom::Table, IdcRoom::IdcId)
                            .to(Idc::Table, Idc::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(IdcRoom::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Idc::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Idc {
    #[sea_orm(iden = "cmdb_idc")]
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum IdcRoom {
    #[sea_orm(iden = "cmdb_idc_room")]
    Table,
    Id,
    IdcId,
    Name,
}
