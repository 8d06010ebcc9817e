use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::businesses::{Column, Entity, Model};
use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::domain::search::{
    execute_plan, ListingFilter, ListingSearch,
};
use crate::modules::listing::application::ports::outgoing::{ListingQuery, ListingQueryError};
use crate::shared::pagination::Page;

/// Columns the text prefilter scans; the same fields the ranking scores.
const TEXT_COLUMNS: [Column; 5] = [
    Column::Name,
    Column::Description,
    Column::Category,
    Column::Address,
    Column::DealDescription,
];

#[derive(Clone)]
pub struct ListingQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ListingQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Attaches owner names with one batched lookup on `users`.
    async fn hydrate(&self, models: Vec<Model>) -> Result<Vec<Listing>, ListingQueryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mut owner_ids: Vec<Uuid> = models.iter().map(|m| m.user_id).collect();
        owner_ids.sort();
        owner_ids.dedup();

        let names: HashMap<Uuid, String> = users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .column(users::Column::Name)
            .filter(users::Column::Id.is_in(owner_ids))
            .into_tuple::<(Uuid, String)>()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .collect();

        models
            .into_iter()
            .map(|model| {
                let owner_name = names.get(&model.user_id).cloned().unwrap_or_default();
                to_listing(model, owner_name)
            })
            .collect()
    }
}

fn map_db_err(e: DbErr) -> ListingQueryError {
    ListingQueryError::DatabaseError(e.to_string())
}

fn to_listing(model: Model, owner_name: String) -> Result<Listing, ListingQueryError> {
    let id = model.id;
    model
        .to_listing(owner_name)
        .map_err(|e| ListingQueryError::CorruptRecord(format!("business {}: {}", id, e)))
}

/// Category, featured and has-deals predicates.
fn with_predicates(filter: &ListingFilter) -> Select<Entity> {
    let mut query = Entity::find();

    if let Some(category) = &filter.category {
        query = query.filter(Column::Category.eq(category.as_str()));
    }
    if filter.featured_only {
        query = query.filter(Column::Featured.eq(true));
    }
    if filter.has_deals_only {
        query = query.filter(Column::HasDeals.eq(true));
    }

    query
}

/// Any term appearing anywhere in any searchable column. Broader than the
/// ranking, which then drops rows that score zero.
fn text_prefilter(terms: &[String]) -> Condition {
    let mut any = Condition::any();
    for term in terms {
        // Terms are alphanumeric only, so they carry no LIKE wildcards.
        let pattern = format!("%{}%", term);
        for column in TEXT_COLUMNS {
            any = any.add(Expr::col(column).ilike(pattern.as_str()));
        }
    }
    any
}

#[async_trait]
impl ListingQuery for ListingQueryPostgres {
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, ListingQueryError> {
        let Some(model) = Entity::find_by_id(id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![model]).await?.into_iter().next())
    }

    async fn find_many(&self, ids: &[ListingId]) -> Result<Vec<Listing>, ListingQueryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<Uuid> = ids.iter().map(|id| id.value()).collect();
        let models = Entity::find()
            .filter(Column::Id.is_in(raw))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let mut by_id: HashMap<ListingId, Listing> = self
            .hydrate(models)
            .await?
            .into_iter()
            .map(|listing| (listing.id, listing))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn search(&self, search: &ListingSearch) -> Result<Page<Listing>, ListingQueryError> {
        if search.filter.matches_nothing() {
            return Ok(Page::new(Vec::new(), search.page, 0));
        }

        let query = with_predicates(&search.filter);
        let terms = search.filter.terms();

        if !terms.is_empty() {
            let candidates = query
                .filter(text_prefilter(&terms))
                .all(&*self.db)
                .await
                .map_err(map_db_err)?;
            let listings = self.hydrate(candidates).await?;
            return Ok(execute_plan(listings, search));
        }

        let matches = query.clone().count(&*self.db).await.map_err(map_db_err)?;
        let window = search.window(matches);

        let models = if window.take == 0 {
            Vec::new()
        } else {
            query
                .order_by_desc(Column::CreatedAt)
                .order_by_asc(Column::Id)
                .offset(window.offset)
                .limit(window.take)
                .all(&*self.db)
                .await
                .map_err(map_db_err)?
        };

        let items = self.hydrate(models).await?;
        Ok(Page::new(items, search.page, window.total))
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Listing>, ListingQueryError> {
        let owner: Uuid = owner.into();
        let models = Entity::find()
            .filter(Column::UserId.eq(owner))
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        self.hydrate(models).await
    }
}
