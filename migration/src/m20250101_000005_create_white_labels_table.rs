use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WhiteLabels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WhiteLabels::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(WhiteLabels::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(WhiteLabels::BrandName)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WhiteLabels::Domain).string_len(255).unique_key())
                    .col(
                        ColumnDef::new(WhiteLabels::Subdomain)
                            .string_len(100)
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WhiteLabels::LogoUrl).text())
                    .col(ColumnDef::new(WhiteLabels::PrimaryColor).string_len(20))
                    .col(ColumnDef::new(WhiteLabels::SecondaryColor).string_len(20))
                    .col(ColumnDef::new(WhiteLabels::CustomCss).text())
                    .col(
                        ColumnDef::new(WhiteLabels::Settings)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WhiteLabels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WhiteLabels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_white_labels_user_id")
                            .from(WhiteLabels::Table, WhiteLabels::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WhiteLabels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WhiteLabels {
    Table,
    Id,
    UserId,
    BrandName,
    Domain,
    Subdomain,
    LogoUrl,
    PrimaryColor,
    SecondaryColor,
    CustomCss,
    Settings,
    CreatedAt,
    UpdatedAt,
}
