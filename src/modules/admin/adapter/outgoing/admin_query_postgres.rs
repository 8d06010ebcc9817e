use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::admin::application::domain::overview::{
    contains_pattern, ListingAdminFilter, ManagedUser, PlatformStats, UserFilter,
};
use crate::modules::admin::application::ports::outgoing::{AdminQuery, AdminQueryError};
use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::auth::application::domain::entities::Role;
use crate::modules::listing::adapter::outgoing::sea_orm_entity::businesses;
use crate::modules::listing::application::domain::entities::{ListingId, ModerationStatus};
use crate::modules::saved_deal::adapter::outgoing::sea_orm_entity::saved_deals;
use crate::shared::pagination::{Page, PageRequest};

#[derive(Clone)]
pub struct AdminQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AdminQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn count_users(&self, cond: Condition) -> Result<u64, AdminQueryError> {
        users::Entity::find()
            .filter(cond)
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn count_businesses(&self, cond: Condition) -> Result<u64, AdminQueryError> {
        businesses::Entity::find()
            .filter(cond)
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }

    /// `owner -> rows` for one table, restricted to `owners`.
    async fn counts_by_owner<E, C>(
        &self,
        owner_column: C,
        owners: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, AdminQueryError>
    where
        E: EntityTrait,
        C: ColumnTrait,
    {
        let rows = E::find()
            .select_only()
            .column(owner_column)
            .column_as(Expr::col(owner_column).count(), "user_rows")
            .filter(owner_column.is_in(owners.to_vec()))
            .group_by(owner_column)
            .into_tuple::<(Uuid, i64)>()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(owner, n)| (owner, u64::try_from(n).unwrap_or_default()))
            .collect())
    }
}

fn map_db_err(e: DbErr) -> AdminQueryError {
    AdminQueryError::DatabaseError(e.to_string())
}

fn user_condition(filter: &UserFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = contains_pattern(term);
        cond = cond.add(
            Condition::any()
                .add(Expr::col(users::Column::Name).ilike(pattern.as_str()))
                .add(Expr::col(users::Column::Email).ilike(pattern.as_str())),
        );
    }
    if let Some(role) = filter.role {
        cond = cond.add(users::Column::Role.eq(role.as_str()));
    }
    cond
}

fn listing_condition(filter: &ListingAdminFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = contains_pattern(term);
        cond = cond.add(
            Condition::any()
                .add(Expr::col(businesses::Column::Name).ilike(pattern.as_str()))
                .add(Expr::col(businesses::Column::Description).ilike(pattern.as_str())),
        );
    }
    if let Some(category) = &filter.category {
        cond = cond.add(businesses::Column::Category.eq(category.as_str()));
    }
    if filter.featured_only {
        cond = cond.add(businesses::Column::Featured.eq(true));
    }
    if let Some(status) = filter.status {
        cond = cond.add(businesses::Column::ApprovalStatus.eq(status.as_str()));
    }
    cond
}

fn role_is(role: Role) -> Condition {
    Condition::all().add(users::Column::Role.eq(role.as_str()))
}

#[async_trait]
impl AdminQuery for AdminQueryPostgres {
    async fn platform_stats(&self, since: DateTime<Utc>) -> Result<PlatformStats, AdminQueryError> {
        let all = Condition::all;

        Ok(PlatformStats {
            total_users: self.count_users(all()).await?,
            total_businesses: self.count_businesses(all()).await?,
            total_partners: self.count_users(role_is(Role::Partner)).await?,
            total_distribution_partners: self.count_users(role_is(Role::Distribution)).await?,
            total_admins: self.count_users(role_is(Role::Admin)).await?,
            featured_businesses: self
                .count_businesses(all().add(businesses::Column::Featured.eq(true)))
                .await?,
            businesses_with_deals: self
                .count_businesses(all().add(businesses::Column::HasDeals.eq(true)))
                .await?,
            total_saved_deals: saved_deals::Entity::find()
                .count(&*self.db)
                .await
                .map_err(map_db_err)?,
            recent_signups: self
                .count_users(all().add(users::Column::CreatedAt.gte(since)))
                .await?,
            recent_businesses: self
                .count_businesses(all().add(businesses::Column::CreatedAt.gte(since)))
                .await?,
            pending_approvals: self
                .count_businesses(
                    all().add(
                        businesses::Column::ApprovalStatus.eq(ModerationStatus::Pending.as_str()),
                    ),
                )
                .await?,
        })
    }

    async fn users(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<ManagedUser>, AdminQueryError> {
        let cond = user_condition(filter);
        let total = self.count_users(cond.clone()).await?;
        if page.offset() >= total {
            return Ok(Page::new(Vec::new(), page, total));
        }

        let models = users::Entity::find()
            .filter(cond)
            .order_by_desc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let listings = self
            .counts_by_owner::<businesses::Entity, _>(businesses::Column::UserId, &ids)
            .await?;
        let saved = self
            .counts_by_owner::<saved_deals::Entity, _>(saved_deals::Column::UserId, &ids)
            .await?;

        let items = models
            .into_iter()
            .map(|model| {
                let identity = model
                    .to_identity()
                    .map_err(|e| AdminQueryError::CorruptRecord(format!("user {}: {}", model.id, e)))?;
                Ok(ManagedUser {
                    listing_count: listings.get(&model.id).copied().unwrap_or(0),
                    saved_deal_count: saved.get(&model.id).copied().unwrap_or(0),
                    identity,
                })
            })
            .collect::<Result<Vec<_>, AdminQueryError>>()?;

        Ok(Page::new(items, page, total))
    }

    async fn listing_ids(
        &self,
        filter: &ListingAdminFilter,
        page: PageRequest,
    ) -> Result<Page<ListingId>, AdminQueryError> {
        let cond = listing_condition(filter);
        let total = self.count_businesses(cond.clone()).await?;
        if page.offset() >= total {
            return Ok(Page::new(Vec::new(), page, total));
        }

        let ids = businesses::Entity::find()
            .select_only()
            .column(businesses::Column::Id)
            .filter(cond)
            .order_by_desc(businesses::Column::CreatedAt)
            .order_by_asc(businesses::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .into_tuple::<Uuid>()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            ids.into_iter().map(ListingId::from).collect(),
            page,
            total,
        ))
    }

    async fn pending_listing_ids(&self) -> Result<Vec<ListingId>, AdminQueryError> {
        let ids = businesses::Entity::find()
            .select_only()
            .column(businesses::Column::Id)
            .filter(businesses::Column::ApprovalStatus.eq(ModerationStatus::Pending.as_str()))
            .order_by_desc(businesses::Column::CreatedAt)
            .into_tuple::<Uuid>()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(ids.into_iter().map(ListingId::from).collect())
    }
}
