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
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Businesses::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Businesses::UserId).uuid().not_null())
                    .col(ColumnDef::new(Businesses::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Businesses::Category)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Businesses::Description).text())
                    .col(ColumnDef::new(Businesses::Address).text().not_null())
                    .col(ColumnDef::new(Businesses::Phone).string_len(50))
                    .col(ColumnDef::new(Businesses::Email).string_len(255))
                    .col(ColumnDef::new(Businesses::Website).text())
                    .col(
                        ColumnDef::new(Businesses::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Businesses::ReviewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Businesses::ImageUrl).text())
                    .col(
                        ColumnDef::new(Businesses::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Businesses::HasDeals)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Businesses::DealDescription).text())
                    .col(ColumnDef::new(Businesses::Hours).json_binary().not_null())
                    .col(
                        ColumnDef::new(Businesses::Amenities)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Businesses::Gallery).json_binary().not_null())
                    .col(
                        ColumnDef::new(Businesses::ApprovalStatus)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Businesses::ApprovedBy).uuid())
                    .col(ColumnDef::new(Businesses::ApprovedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Businesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Businesses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_businesses_user_id")
                            .from(Businesses::Table, Businesses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_businesses_approved_by")
                            .from(Businesses::Table, Businesses::ApprovedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE businesses
                ADD CONSTRAINT chk_businesses_rating CHECK (rating >= 0 AND rating <= 5),
                ADD CONSTRAINT chk_businesses_review_count CHECK (review_count >= 0),
                ADD CONSTRAINT chk_businesses_approval_status
                    CHECK (approval_status IN ('pending', 'approved', 'rejected'));
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_businesses_user_id ON businesses (user_id);
                CREATE INDEX IF NOT EXISTS idx_businesses_category ON businesses (category);
                CREATE INDEX IF NOT EXISTS idx_businesses_featured ON businesses (featured);
                CREATE INDEX IF NOT EXISTS idx_businesses_has_deals ON businesses (has_deals);
                CREATE INDEX IF NOT EXISTS idx_businesses_approval_status ON businesses (approval_status);
                CREATE INDEX IF NOT EXISTS idx_businesses_created_at ON businesses (created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Businesses {
    Table,
    Id,
    UserId,
    Name,
    Category,
    Description,
    Address,
    Phone,
    Email,
    Website,
    Rating,
    ReviewCount,
    ImageUrl,
    Featured,
    HasDeals,
    DealDescription,
    Hours,
    Amenities,
    Gallery,
    ApprovalStatus,
    ApprovedBy,
    ApprovedAt,
    CreatedAt,
    UpdatedAt,
}
