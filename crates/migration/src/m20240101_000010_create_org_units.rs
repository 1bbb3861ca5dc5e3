//! Create `cmdb_product_unit` and `cmdb_domain`.
//!
//! Both hang off a business unit and are detached (SET NULL) when it goes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductUnit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductUnit::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(ProductUnit::Name, 64).not_null())
                    .col(big_integer_null(ProductUnit::BusinessUnitId))
                    .col(text_null(ProductUnit::Description))
                    .col(timestamp_with_time_zone(ProductUnit::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ProductUnit::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_unit_business_unit")
                            .from(ProductUnit::Table, ProductUnit::BusinessUnitId)
                            .to(BusinessUnit::Table, BusinessUnit::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Domain::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Domain::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Domain::Name, 64).not_null())
                    .col(big_integer_null(Domain::BusinessUnitId))
                    .col(text_null(Domain::Description))
                    .col(timestamp_with_time_zone(Domain::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Domain::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_domain_business_unit")
                            .from(Domain::Table, Domain::BusinessUnitId)
                            .to(BusinessUnit::Table, BusinessUnit::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Domain::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(ProductUnit::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductUnit {
    #[sea_orm(iden = "cmdb_product_unit")]
    Table,
    Id,
    Name,
    BusinessUnitId,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Domain {
    #[sea_orm(iden = "cmdb_domain")]
    Table,
    Id,
    Name,
    BusinessUnitId,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BusinessUnit {
    #[sea_orm(iden = "cmdb_business_unit")]
    Table,
    Id,
}
