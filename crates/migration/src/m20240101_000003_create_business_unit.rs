//! Create `cmdb_business_unit` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BusinessUnit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BusinessUnit::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(BusinessUnit::Name, 64).unique_key().not_null())
                    .col(string_len_null(BusinessUnit::Owners, 64))
                    .col(text_null(BusinessUnit::Description))
                    .col(timestamp_with_time_zone(BusinessUnit::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(BusinessUnit::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BusinessUnit::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BusinessUnit {
    #[sea_orm(iden = "cmdb_business_unit")]
    Table,
    Id,
    Name,
    Owners,
    Description,
    CreatedAt,
    UpdatedAt,
}
