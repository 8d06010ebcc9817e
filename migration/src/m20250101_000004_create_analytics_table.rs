use sea_orm_migration::prelude::*;

use crate::m20250101_000002_create_businesses_table::Businesses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Analytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Analytics::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Analytics::BusinessId).uuid().not_null())
                    .col(ColumnDef::new(Analytics::EventType).string_len(20).not_null())
                    .col(ColumnDef::new(Analytics::ClickType).string_len(20))
                    .col(
                        ColumnDef::new(Analytics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_analytics_business_id")
                            .from(Analytics::Table, Analytics::BusinessId)
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
                ALTER TABLE analytics
                ADD CONSTRAINT chk_analytics_event_type CHECK (event_type IN ('view', 'click'));

                CREATE INDEX IF NOT EXISTS idx_analytics_business_event
                ON analytics (business_id, event_type);

                CREATE INDEX IF NOT EXISTS idx_analytics_created_at
                ON analytics (created_at);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Analytics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Analytics {
    Table,
    Id,
    BusinessId,
    EventType,
    ClickType,
    CreatedAt,
}
