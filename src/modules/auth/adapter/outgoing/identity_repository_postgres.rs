use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::users::{ActiveModel, Entity, Model};
use crate::modules::auth::application::domain::entities::{Identity, UserId};
use crate::modules::auth::application::ports::outgoing::{
    IdentityRepository, IdentityRepositoryError, NewIdentity, ProfileChanges,
};
use crate::shared::db_errors::is_unique_violation;

#[derive(Clone)]
pub struct IdentityRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl IdentityRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load(&self, id: UserId) -> Result<Model, IdentityRepositoryError> {
        Entity::find_by_id(id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(IdentityRepositoryError::NotFound)
    }
}

fn map_db_err(e: DbErr) -> IdentityRepositoryError {
    IdentityRepositoryError::DatabaseError(e.to_string())
}

fn map_write_err(e: DbErr) -> IdentityRepositoryError {
    if is_unique_violation(&e, Some("email")) {
        IdentityRepositoryError::EmailAlreadyExists
    } else {
        map_db_err(e)
    }
}

fn to_identity(model: &Model) -> Result<Identity, IdentityRepositoryError> {
    model
        .to_identity()
        .map_err(|e| IdentityRepositoryError::DatabaseError(e.to_string()))
}

#[async_trait]
impl IdentityRepository for IdentityRepositoryPostgres {
    async fn create(&self, data: NewIdentity) -> Result<Identity, IdentityRepositoryError> {
        let now = Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            role: Set(data.role.as_str().to_string()),
            suspended: Set(false),
            suspended_by: Set(None),
            suspended_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_write_err)?;
        to_identity(&inserted)
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: ProfileChanges,
    ) -> Result<Identity, IdentityRepositoryError> {
        let mut active: ActiveModel = self.load(id).await?.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }

        let updated = active.update(&*self.db).await.map_err(map_write_err)?;
        to_identity(&updated)
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: String,
    ) -> Result<(), IdentityRepositoryError> {
        let mut active: ActiveModel = self.load(id).await?.into();
        active.password_hash = Set(password_hash);
        active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn save_account_state(
        &self,
        identity: &Identity,
    ) -> Result<Identity, IdentityRepositoryError> {
        let mut active: ActiveModel = self.load(identity.id).await?.into();
        active.suspended = Set(identity.suspended);
        active.suspended_by = Set(identity.suspended_by.map(Uuid::from));
        active.suspended_at = Set(identity.suspended_at.map(Into::into));

        let updated = active.update(&*self.db).await.map_err(map_db_err)?;
        to_identity(&updated)
    }

    async fn delete(&self, id: UserId) -> Result<(), IdentityRepositoryError> {
        let result = Entity::delete_by_id(id.value())
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(IdentityRepositoryError::NotFound);
        }
        Ok(())
    }
}
