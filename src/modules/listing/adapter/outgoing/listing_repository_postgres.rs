use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::businesses::{ActiveModel, Entity, Model};
use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::listing::application::domain::entities::{Listing, ListingId};
use crate::modules::listing::application::domain::listing_draft::NewListing;
use crate::modules::listing::application::ports::outgoing::{
    ListingRepository, ListingRepositoryError,
};

#[derive(Clone)]
pub struct ListingRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ListingRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn owner_name(&self, owner: Uuid) -> Result<String, ListingRepositoryError> {
        Ok(users::Entity::find_by_id(owner)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(|user| user.name)
            .unwrap_or_default())
    }
}

fn map_db_err(e: DbErr) -> ListingRepositoryError {
    match e {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => ListingRepositoryError::NotFound,
        other => ListingRepositoryError::DatabaseError(other.to_string()),
    }
}

fn to_listing(model: Model, owner_name: String) -> Result<Listing, ListingRepositoryError> {
    model
        .to_listing(owner_name)
        .map_err(|e| ListingRepositoryError::DatabaseError(e.to_string()))
}

fn review_count(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[async_trait]
impl ListingRepository for ListingRepositoryPostgres {
    async fn create(&self, data: NewListing) -> Result<Listing, ListingRepositoryError> {
        let owner: Uuid = data.owner.into();
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner),
            name: Set(data.name),
            category: Set(data.category),
            description: Set(data.description),
            address: Set(data.address),
            phone: Set(data.phone),
            email: Set(data.email),
            website: Set(data.website),
            rating: Set(data.rating),
            review_count: Set(review_count(data.review_count)),
            image_url: Set(data.image_url),
            featured: Set(false),
            has_deals: Set(data.has_deals),
            deal_description: Set(data.deal_description),
            hours: Set(data.hours),
            amenities: Set(data.amenities),
            gallery: Set(data.gallery),
            approval_status: Set(data.status.as_str().to_string()),
            approved_by: Set(None),
            approved_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        let owner_name = self.owner_name(owner).await?;
        to_listing(inserted, owner_name)
    }

    async fn update(&self, listing: &Listing) -> Result<Listing, ListingRepositoryError> {
        let current = Entity::find_by_id(listing.id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ListingRepositoryError::NotFound)?;

        let mut active: ActiveModel = current.into();
        active.name = Set(listing.name.clone());
        active.category = Set(listing.category.clone());
        active.description = Set(listing.description.clone());
        active.address = Set(listing.address.clone());
        active.phone = Set(listing.phone.clone());
        active.email = Set(listing.email.clone());
        active.website = Set(listing.website.clone());
        active.rating = Set(listing.rating);
        active.review_count = Set(review_count(listing.review_count));
        active.image_url = Set(listing.image_url.clone());
        active.featured = Set(listing.featured);
        active.has_deals = Set(listing.has_deals);
        active.deal_description = Set(listing.deal_description.clone());
        active.hours = Set(listing.hours.clone());
        active.amenities = Set(listing.amenities.clone());
        active.gallery = Set(listing.gallery.clone());
        active.approval_status = Set(listing.moderation.status.as_str().to_string());
        active.approved_by = Set(listing.moderation.approved_by.map(Uuid::from));
        active.approved_at = Set(listing.moderation.approved_at.map(Into::into));

        let updated = active.update(&*self.db).await.map_err(map_db_err)?;
        to_listing(updated, listing.owner.name.clone())
    }

    async fn delete(&self, id: ListingId) -> Result<(), ListingRepositoryError> {
        let result = Entity::delete_by_id(id.value())
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(ListingRepositoryError::NotFound);
        }
        Ok(())
    }
}
