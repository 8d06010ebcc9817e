use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, QueryTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::analytics::{ActiveModel, Column, Entity};
use crate::modules::analytics::application::domain::events::{EventFilter, EventKind, TimeWindow};
use crate::modules::analytics::application::ports::outgoing::{EventStore, EventStoreError};
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::listing::adapter::outgoing::sea_orm_entity::businesses;
use crate::modules::listing::application::domain::entities::ListingId;

#[derive(Clone)]
pub struct EventStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl EventStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn count_where(&self, scope: Condition) -> Result<u64, EventStoreError> {
        Entity::find()
            .filter(scope)
            .count(&*self.db)
            .await
            .map_err(map_db_err)
    }
}

fn map_db_err(e: DbErr) -> EventStoreError {
    EventStoreError::DatabaseError(e.to_string())
}

fn event_condition(filter: EventFilter, window: Option<TimeWindow>) -> Condition {
    let mut cond = match filter {
        EventFilter::Views => Condition::all().add(Column::EventType.eq("view")),
        EventFilter::Clicks => Condition::all().add(Column::EventType.eq("click")),
        EventFilter::ClicksOf(kind) => Condition::all()
            .add(Column::EventType.eq("click"))
            .add(Column::ClickType.eq(kind.as_str())),
    };

    if let Some(window) = window {
        cond = cond
            .add(Column::CreatedAt.gte(window.since))
            .add(Column::CreatedAt.lt(window.until));
    }

    cond
}

#[async_trait]
impl EventStore for EventStorePostgres {
    async fn record(
        &self,
        listing: ListingId,
        kind: EventKind,
        at: DateTime<Utc>,
    ) -> Result<(), EventStoreError> {
        let event = ActiveModel {
            id: Set(Uuid::new_v4()),
            business_id: Set(listing.value()),
            event_type: Set(kind.event_type().to_string()),
            click_type: Set(kind.click_kind().map(|k| k.as_str().to_string())),
            created_at: Set(at.into()),
        };

        Entity::insert(event)
            .exec_without_returning(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn count(
        &self,
        listing: ListingId,
        filter: EventFilter,
        window: Option<TimeWindow>,
    ) -> Result<u64, EventStoreError> {
        let scope = event_condition(filter, window).add(Column::BusinessId.eq(listing.value()));
        self.count_where(scope).await
    }

    async fn count_for_owner(
        &self,
        owner: UserId,
        filter: EventFilter,
        window: Option<TimeWindow>,
    ) -> Result<u64, EventStoreError> {
        let owner: Uuid = owner.into();
        let owned = businesses::Entity::find()
            .select_only()
            .column(businesses::Column::Id)
            .filter(businesses::Column::UserId.eq(owner))
            .into_query();

        let scope = event_condition(filter, window).add(Column::BusinessId.in_subquery(owned));
        self.count_where(scope).await
    }
}
