//! Create `cmdb_asset_tag`, the asset/tag many-to-many join.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AssetTag::Table)
                    .if_not_exists()
                    .col(big_integer(AssetTag::AssetId).not_null())
                    .col(big_integer(AssetTag::TagId).not_null())
                    .primary_key(Index::create().col(AssetTag::AssetId).col(AssetTag::TagId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_tag_asset")
                            .from(AssetTag::Table, AssetTag::AssetId)
                            .to(Asset::Table, Asset::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_tag_tag")
                            .from(AssetTag::Table, AssetTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AssetTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AssetTag {
    #[sea_orm(iden = "cmdb_asset_tag")]
    Table,
    AssetId,
    TagId,
}

#[derive(DeriveIden)]
enum Asset {
    #[sea_orm(iden = "cmdb_asset")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Tag {
    #[sea_orm(iden = "cmdb_tag")]
    Table,
    Id,
}
