//! Create `cmdb_menus`, the navigable/protected resource tree.
//!
//! `parent_id` is a self reference (strict tree, RESTRICT on delete).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Menus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Menus::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Menus::Name, 100).not_null())
                    .col(big_integer_null(Menus::ParentId))
                    .col(string_len_null(Menus::Url, 100))
                    .col(boolean(Menus::CanGet).not_null().default(false))
                    .col(boolean(Menus::CanPost).not_null().default(false))
                    .col(boolean(Menus::CanPut).not_null().default(false))
                    .col(boolean(Menus::CanDelete).not_null().default(false))
                    .col(integer(Menus::Sort).not_null().default(0))
                    .col(boolean(Menus::IsActive).not_null().default(false))
                    .col(text_null(Menus::Description))
                    .col(timestamp_with_time_zone(Menus::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Menus::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menus_parent")
                            .from(Menus::Table, Menus::ParentId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Menus::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Menus {
    #[sea_orm(iden = "cmdb_menus")]
    Table,
    Id,
    Name,
    ParentId,
    Url,
    CanGet,
    CanPost,
    CanPut,
    CanDelete,
    Sort,
    IsActive,
    Description,
    CreatedAt,
    UpdatedAt,
}
