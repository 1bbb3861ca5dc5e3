//! Create `cmdb_user_profile` table.
//!
//! Extends the external identity record with organizational attributes.
//! `leader_id` is a self reference; deletes are RESTRICTed while referenced.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfile::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(UserProfile::UserId).unique_key().not_null())
                    .col(string_len(UserProfile::Name, 32).not_null())
                    .col(string_len_null(UserProfile::Token, 128))
                    .col(string_len(UserProfile::Kind, 32).not_null())
                    .col(big_integer(UserProfile::BusinessUnitId).not_null())
                    .col(string_len(UserProfile::Email, 255).not_null())
                    .col(string_len(UserProfile::Mobile, 32).not_null())
                    .col(string_len_null(UserProfile::EmployeeId, 32))
                    .col(big_integer_null(UserProfile::LeaderId))
                    .col(text_null(UserProfile::Memo))
                    .col(timestamp_with_time_zone(UserProfile::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(UserProfile::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profile_business_unit")
                            .from(UserProfile::Table, UserProfile::BusinessUnitId)
                            .to(BusinessUnit::Table, BusinessUnit::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profile_leader")
                            .from(UserProfile::Table, UserProfile::LeaderId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Ops-contact join between business units and profiles
        manager
            .create_table(
                Table::create()
                    .table(BusinessUnitOps::Table)
                    .if_not_exists()
                    .col(big_integer(BusinessUnitOps::BusinessUnitId).not_null())
                    .col(big_integer(BusinessUnitOps::UserProfileId).not_null())
                    .primary_key(
                        Index::create()
                            .col(BusinessUnitOps::BusinessUnitId)
                            .col(BusinessUnitOps::UserProfileId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bu_ops_business_unit")
                            .from(BusinessUnitOps::Table, BusinessUnitOps::BusinessUnitId)
                            .to(BusinessUnit::Table, BusinessUnit::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bu_ops_user_profile")
                            .from(BusinessUnitOps::Table, BusinessUnitOps::UserProfileId)
                            .to(UserProfile::Table, UserProfile::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BusinessUnitOps::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(UserProfile::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserProfile {
    #[sea_orm(iden = "cmdb_user_profile")]
    Table,
    Id,
    UserId,
    Name,
    Token,
    Kind,
    BusinessUnitId,
    Email,
    Mobile,
    EmployeeId,
    LeaderId,
    Memo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BusinessUnitOps {
    #[sea_orm(iden = "cmdb_business_unit_ops")]
    Table,
    BusinessUnitId,
    UserProfileId,
}

#[derive(DeriveIden)]
enum BusinessUnit {
    #[sea_orm(iden = "cmdb_business_unit")]
    Table,
    Id,
}
