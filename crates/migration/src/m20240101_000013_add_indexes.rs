use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Asset: lookups by business unit and facility
        manager
            .create_index(
                Index::create()
                    .name("idx_asset_business_unit")
                    .table(Asset::Table)
                    .col(Asset::BusinessUnitId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_asset_idc")
                    .table(Asset::Table)
                    .col(Asset::IdcId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_asset_device_type")
                    .table(Asset::Table)
                    .col(Asset::DeviceType)
                    .to_owned(),
            )
            .await?;

        // UserProfile: reporting-chain walks
        manager
            .create_index(
                Index::create()
                    .name("idx_user_profile_leader")
                    .table(UserProfile::Table)
                    .col(UserProfile::LeaderId)
                    .to_owned(),
            )
            .await?;

        // Menus: tree walks and display ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_menus_parent")
                    .table(Menus::Table)
                    .col(Menus::ParentId)
                    .to_owned(),
            )
            .await?;

        // UserMenus: one overlay row per (user, menu)
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_menus_pair")
                    .table(UserMenus::Table)
                    .col(UserMenus::UserProfileId)
                    .col(UserMenus::MenuId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_asset_business_unit").table(Asset::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_asset_idc").table(Asset::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_asset_device_type").table(Asset::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_profile_leader").table(UserProfile::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_menus_parent").table(Menus::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_user_menus_pair").table(UserMenus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Asset {
    #[sea_orm(iden = "cmdb_asset")]
    Table,
    BusinessUnitId,
    IdcId,
    DeviceType,
}

#[derive(DeriveIden)]
enum UserProfile {
    #[sea_orm(iden = "cmdb_user_profile")]
    Table,
    LeaderId,
}

#[derive(DeriveIden)]
enum Menus {
    #[sea_orm(iden = "cmdb_menus")]
    Table,
    ParentId,
}

#[derive(DeriveIden)]
enum UserMenus {
    #[sea_orm(iden = "cmdb_userprofile_menus")]
    Table,
    UserProfileId,
    MenuId,
}
