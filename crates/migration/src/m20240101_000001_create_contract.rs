//! Create `cmdb_contract` table.
//!
//! Purchase contracts; assets reference them with SET NULL on delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contract::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contract::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Contract::Name, 128).not_null())
                    .col(string_len(Contract::Number, 64).unique_key().not_null())
                    .col(date_null(Contract::SignedAt))
                    .col(date_null(Contract::ExpiredAt))
                    .col(text_null(Contract::Memo))
                    .col(timestamp_with_time_zone(Contract::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Contract::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contract::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contract {
    #[sea_orm(iden = "cmdb_contract")]
    Table,
    Id,
    Name,
    Number,
    SignedAt,
    ExpiredAt,
    Memo,
    CreatedAt,
    UpdatedAt,
}
