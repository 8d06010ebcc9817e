use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::saved_deals::{ActiveModel, Column, Entity};
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::listing::application::domain::entities::ListingId;
use crate::modules::saved_deal::application::ports::outgoing::{
    SavedDealStore, SavedDealStoreError,
};
use crate::shared::db_errors::is_unique_violation;

#[derive(Clone)]
pub struct SavedDealStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl SavedDealStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> SavedDealStoreError {
    if is_unique_violation(&e, None) {
        return SavedDealStoreError::AlreadySaved;
    }
    SavedDealStoreError::DatabaseError(e.to_string())
}

#[async_trait]
impl SavedDealStore for SavedDealStorePostgres {
    async fn listing_ids(&self, owner: UserId) -> Result<Vec<ListingId>, SavedDealStoreError> {
        let owner: Uuid = owner.into();
        let rows = Entity::find()
            .filter(Column::UserId.eq(owner))
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| ListingId::from(row.business_id))
            .collect())
    }

    async fn contains(
        &self,
        owner: UserId,
        listing: ListingId,
    ) -> Result<bool, SavedDealStoreError> {
        let found = Entity::find_by_id((owner.value(), listing.value()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(found.is_some())
    }

    async fn insert(
        &self,
        owner: UserId,
        listing: ListingId,
        at: DateTime<Utc>,
    ) -> Result<(), SavedDealStoreError> {
        let row = ActiveModel {
            user_id: Set(owner.value()),
            business_id: Set(listing.value()),
            created_at: Set(at.into()),
        };

        Entity::insert(row)
            .exec_without_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn remove(
        &self,
        owner: UserId,
        listing: ListingId,
    ) -> Result<bool, SavedDealStoreError> {
        let res = Entity::delete_many()
            .filter(Column::UserId.eq(owner.value()))
            .filter(Column::BusinessId.eq(listing.value()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }
}
