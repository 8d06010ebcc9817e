use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::users::{Column, Entity, Model};
use crate::modules::auth::application::domain::entities::{Identity, UserId};
use crate::modules::auth::application::ports::outgoing::{
    ActivityCounts, IdentityQuery, IdentityQueryError, StoredCredentials,
};
use crate::modules::listing::adapter::outgoing::sea_orm_entity::businesses;
use crate::modules::saved_deal::adapter::outgoing::sea_orm_entity::saved_deals;

#[derive(Clone)]
pub struct IdentityQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl IdentityQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> IdentityQueryError {
    IdentityQueryError::DatabaseError(e.to_string())
}

fn to_identity(model: &Model) -> Result<Identity, IdentityQueryError> {
    model
        .to_identity()
        .map_err(|e| IdentityQueryError::CorruptRecord(format!("user {}: {}", model.id, e)))
}

fn to_credentials(model: Model) -> Result<StoredCredentials, IdentityQueryError> {
    let identity = to_identity(&model)?;
    Ok(StoredCredentials {
        identity,
        password_hash: model.password_hash,
    })
}

#[async_trait]
impl IdentityQuery for IdentityQueryPostgres {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, IdentityQueryError> {
        Entity::find_by_id(id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .as_ref()
            .map(to_identity)
            .transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, IdentityQueryError> {
        Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(to_credentials)
            .transpose()
    }

    async fn find_credentials_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<StoredCredentials>, IdentityQueryError> {
        Entity::find_by_id(id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(to_credentials)
            .transpose()
    }

    async fn email_taken(
        &self,
        email: &str,
        except: Option<UserId>,
    ) -> Result<bool, IdentityQueryError> {
        let mut query = Entity::find().filter(Column::Email.eq(email.trim().to_lowercase()));
        if let Some(except) = except {
            query = query.filter(Column::Id.ne(except.value()));
        }

        let count = query.count(&*self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn activity_counts(&self, id: UserId) -> Result<ActivityCounts, IdentityQueryError> {
        let owner: Uuid = id.into();

        let listings = businesses::Entity::find()
            .filter(businesses::Column::UserId.eq(owner))
            .count(&*self.db)
            .await
            .map_err(map_db_err)?;

        let saved_deals = saved_deals::Entity::find()
            .filter(saved_deals::Column::UserId.eq(owner))
            .count(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(ActivityCounts {
            listings,
            saved_deals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn user_model(id: Uuid, role: &str) -> Model {
        let now = Utc::now();
        Model {
            id,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: role.to_string(),
            suspended: false,
            suspended_by: None,
            suspended_at: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    #[tokio::test]
    async fn find_by_id_maps_role() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model(id, "distribution")]])
            .into_connection();

        let identity = IdentityQueryPostgres::new(Arc::new(db))
            .find_by_id(UserId::from(id))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(identity.id, UserId::from(id));
        assert_eq!(
            identity.role,
            crate::modules::auth::application::domain::entities::Role::Distribution
        );
    }

    #[tokio::test]
    async fn unknown_role_is_a_corrupt_record() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model(id, "superuser")]])
            .into_connection();

        let result = IdentityQueryPostgres::new(Arc::new(db))
            .find_by_id(UserId::from(id))
            .await;

        assert!(matches!(result, Err(IdentityQueryError::CorruptRecord(_))));
    }

    #[tokio::test]
    async fn credentials_carry_the_hash() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_model(id, "user")]])
            .into_connection();

        let stored = IdentityQueryPostgres::new(Arc::new(db))
            .find_credentials_by_email("ADA@example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored.password_hash, "hash");
    }

    #[tokio::test]
    async fn activity_counts_reads_both_tables() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(3)]])
            .append_query_results(vec![vec![count_row(7)]])
            .into_connection();

        let counts = IdentityQueryPostgres::new(Arc::new(db))
            .activity_counts(UserId::from(Uuid::new_v4()))
            .await
            .unwrap();

        assert_eq!(
            counts,
            ActivityCounts {
                listings: 3,
                saved_deals: 7
            }
        );
    }

    #[tokio::test]
    async fn database_errors_propagate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection timeout".to_string())])
            .into_connection();

        let result = IdentityQueryPostgres::new(Arc::new(db))
            .find_by_id(UserId::from(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(IdentityQueryError::DatabaseError(_))));
    }
}
