//! Create `cmdb_tag` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tag::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Tag::Name, 32).unique_key().not_null())
                    .col(big_integer_null(Tag::CreatorId))
                    .col(string_len_null(Tag::Description, 64))
                    .col(timestamp_with_time_zone(Tag::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Tag::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_creator")
                            .from(Tag::Table, Tag::CreatorId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tag {
    #[sea_orm(iden = "cmdb_tag")]
    Table,
    Id,
    Name,
    CreatorId,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserProfile {
    #[sea_orm(iden = "cmdb_user_profile")]
    Table,
    Id,
}
