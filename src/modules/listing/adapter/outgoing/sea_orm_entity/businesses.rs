use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, Set};

use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::listing::application::domain::entities::{
    Listing, ListingId, ListingOwner, Moderation, ModerationStatus, UnknownModerationStatus,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "businesses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_name = "user_id")]
    pub user_id: Uuid,

    pub name: String,
    pub category: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub address: String,

    pub phone: Option<String>,
    pub email: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub website: Option<String>,

    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub review_count: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,

    pub featured: bool,
    pub has_deals: bool,

    #[sea_orm(column_type = "Text", nullable)]
    pub deal_description: Option<String>,

    #[sea_orm(column_type = "JsonBinary")]
    pub hours: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub amenities: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub gallery: Json,

    pub approval_status: String,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(name) = &self.name {
            self.name = Set(name.trim().to_string());
        }

        if !insert {
            self.updated_at = Set(chrono::Utc::now().into());
        }

        Ok(self)
    }
}

impl Model {
    /// `owner_name` comes from the users table; the row only has the id.
    pub fn to_listing(self, owner_name: String) -> Result<Listing, UnknownModerationStatus> {
        let status = self.approval_status.parse::<ModerationStatus>()?;

        Ok(Listing {
            id: ListingId::from(self.id),
            owner: ListingOwner {
                id: UserId::from(self.user_id),
                name: owner_name,
            },
            name: self.name,
            category: self.category,
            description: self.description,
            address: self.address,
            phone: self.phone,
            email: self.email,
            website: self.website,
            rating: self.rating,
            review_count: u32::try_from(self.review_count).unwrap_or(0),
            image_url: self.image_url,
            featured: self.featured,
            has_deals: self.has_deals,
            deal_description: self.deal_description,
            hours: self.hours,
            amenities: self.amenities,
            gallery: self.gallery,
            moderation: Moderation {
                status,
                approved_by: self.approved_by.map(UserId::from),
                approved_at: self.approved_at.map(|t| t.with_timezone(&chrono::Utc)),
            },
            created_at: self.created_at.with_timezone(&chrono::Utc),
            updated_at: self.updated_at.with_timezone(&chrono::Utc),
        })
    }
}
