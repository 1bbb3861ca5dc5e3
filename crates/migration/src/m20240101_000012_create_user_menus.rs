//! Create `cmdb_userprofile_menus`, the per-user permission overlay.
//!
//! The (user_profile_id, menu_id) pair is unique; the overlay is authoritative
//! over the menu baseline when present.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserMenus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserMenus::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(UserMenus::UserProfileId).not_null())
                    .col(big_integer(UserMenus::MenuId).not_null())
                    .col(boolean(UserMenus::CanGet).not_null().default(false))
                    .col(boolean(UserMenus::CanPost).not_null().default(false))
                    .col(boolean(UserMenus::CanPut).not_null().default(false))
                    .col(boolean(UserMenus::CanDelete).not_null().default(false))
                    .col(text_null(UserMenus::Description))
                    .col(timestamp_with_time_zone(UserMenus::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(UserMenus::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_menus_user_profile")
                            .from(UserMenus::Table, UserMenus::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_menus_menu")
                            .from(UserMenus::Table, UserMenus::MenuId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserMenus::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserMenus {
    #[sea_orm(iden = "cmdb_userprofile_menus")]
    Table,
    Id,
    UserProfileId,
    MenuId,
    CanGet,
    CanPost,
    CanPut,
    CanDelete,
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

#[derive(DeriveIden)]
enum Menus {
    #[sea_orm(iden = "cmdb_menus")]
    Table,
    Id,
}
