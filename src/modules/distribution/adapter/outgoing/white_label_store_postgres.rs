use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use std::sync::Arc;

use super::sea_orm_entity::white_labels::{ActiveModel, Column, Entity};
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::distribution::application::domain::white_label::WhiteLabel;
use crate::modules::distribution::application::ports::outgoing::{
    WhiteLabelStore, WhiteLabelStoreError,
};
use crate::shared::db_errors::is_unique_violation;

#[derive(Clone)]
pub struct WhiteLabelStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl WhiteLabelStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> WhiteLabelStoreError {
    // "subdomain" contains "domain"; check it first.
    if is_unique_violation(&e, Some("subdomain")) {
        WhiteLabelStoreError::SubdomainTaken
    } else if is_unique_violation(&e, Some("domain")) {
        WhiteLabelStoreError::DomainTaken
    } else if is_unique_violation(&e, Some("user_id")) {
        WhiteLabelStoreError::AlreadyExists
    } else if matches!(e, DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated) {
        WhiteLabelStoreError::NotFound
    } else {
        WhiteLabelStoreError::DatabaseError(e.to_string())
    }
}

fn active_model(p: &WhiteLabel) -> ActiveModel {
    ActiveModel {
        id: Set(p.id),
        user_id: Set(p.owner.value()),
        brand_name: Set(p.brand_name.clone()),
        domain: Set(p.domain.clone()),
        subdomain: Set(p.subdomain.clone()),
        logo_url: Set(p.logo_url.clone()),
        primary_color: Set(p.primary_color.clone()),
        secondary_color: Set(p.secondary_color.clone()),
        custom_css: Set(p.custom_css.clone()),
        settings: Set(p.settings.clone()),
        created_at: Set(p.created_at.into()),
        updated_at: Set(p.updated_at.into()),
    }
}

#[async_trait]
impl WhiteLabelStore for WhiteLabelStorePostgres {
    async fn find_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Option<WhiteLabel>, WhiteLabelStoreError> {
        let found = Entity::find()
            .filter(Column::UserId.eq(owner.value()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(found.map(WhiteLabel::from))
    }

    async fn insert(&self, profile: &WhiteLabel) -> Result<WhiteLabel, WhiteLabelStoreError> {
        let model = active_model(profile)
            .insert(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update(&self, profile: &WhiteLabel) -> Result<WhiteLabel, WhiteLabelStoreError> {
        let mut active = active_model(profile);
        active.created_at = sea_orm::ActiveValue::NotSet;

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::distribution::adapter::outgoing::sea_orm_entity::white_labels::Model;
    use crate::modules::distribution::application::domain::white_label::default_settings;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn model(owner: Uuid) -> Model {
        let now = Utc::now();
        Model {
            id: Uuid::new_v4(),
            user_id: owner,
            brand_name: "Metro Guide".to_string(),
            domain: None,
            subdomain: Some("metro".to_string()),
            logo_url: None,
            primary_color: Some("#112233".to_string()),
            secondary_color: None,
            custom_css: None,
            settings: default_settings(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_by_owner_maps_the_row() {
        let owner = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(owner)]])
            .into_connection();

        let profile = WhiteLabelStorePostgres::new(Arc::new(db))
            .find_by_owner(UserId::from(owner))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(profile.owner, UserId::from(owner));
        assert_eq!(profile.subdomain.as_deref(), Some("metro"));
        assert_eq!(profile.settings["enable_messages"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn duplicate_subdomain_is_not_reported_as_domain() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint \"white_labels_subdomain_key\""
                    .to_string(),
            )])
            .into_connection();
        let profile: WhiteLabel = model(Uuid::new_v4()).into();

        let result = WhiteLabelStorePostgres::new(Arc::new(db))
            .update(&profile)
            .await;

        assert_eq!(result, Err(WhiteLabelStoreError::SubdomainTaken));
    }

    #[tokio::test]
    async fn duplicate_domain_conflicts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint \"white_labels_domain_key\""
                    .to_string(),
            )])
            .into_connection();
        let profile: WhiteLabel = model(Uuid::new_v4()).into();

        let result = WhiteLabelStorePostgres::new(Arc::new(db))
            .insert(&profile)
            .await;

        assert_eq!(result, Err(WhiteLabelStoreError::DomainTaken));
    }
}
