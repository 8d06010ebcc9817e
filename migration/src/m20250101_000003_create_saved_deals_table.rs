use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_users_table::Users;
use crate::m20250101_000002_create_businesses_table::Businesses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedDeals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SavedDeals::UserId).uuid().not_null())
                    .col(ColumnDef::new(SavedDeals::BusinessId).uuid().not_null())
                    .col(
                        ColumnDef::new(SavedDeals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // One saved deal per (user, business)
                    .primary_key(
                        Index::create()
                            .col(SavedDeals::UserId)
                            .col(SavedDeals::BusinessId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_deals_user_id")
                            .from(SavedDeals::Table, SavedDeals::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_deals_business_id")
                            .from(SavedDeals::Table, SavedDeals::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_saved_deals_business_id
                ON saved_deals (business_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedDeals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SavedDeals {
    Table,
    UserId,
    BusinessId,
    CreatedAt,
}
