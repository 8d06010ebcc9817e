use async_trait::async_trait;
use chrono::Utc;

use crate::modules::access::{authorize, AccessError, Action, Actor, Resource};
use crate::modules::admin::application::domain::overview::{AccountCommand, ManagedUser};
use crate::modules::admin::application::ports::incoming::use_cases::{
    AdminError, DeleteUserUseCase, SetAccountStateUseCase,
};
use crate::modules::auth::application::domain::entities::UserId;
use crate::modules::auth::application::ports::outgoing::{IdentityQuery, IdentityRepository};
use crate::shared::cache::{CacheNamespace, ResultCache};

/// Suspend, reactivate and delete accounts on behalf of an admin.
pub struct AccountModerationService<Q, R>
where
    Q: IdentityQuery,
    R: IdentityRepository,
{
    identities: Q,
    repository: R,
    cache: ResultCache,
}

impl<Q, R> AccountModerationService<Q, R>
where
    Q: IdentityQuery,
    R: IdentityRepository,
{
    pub fn new(identities: Q, repository: R, cache: ResultCache) -> Self {
        Self {
            identities,
            repository,
            cache,
        }
    }
}

#[async_trait]
impl<Q, R> SetAccountStateUseCase for AccountModerationService<Q, R>
where
    Q: IdentityQuery + Send + Sync,
    R: IdentityRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        target: UserId,
        command: AccountCommand,
    ) -> Result<ManagedUser, AdminError> {
        let action = match command {
            AccountCommand::Suspend => Action::Suspend,
            AccountCommand::Activate => Action::Activate,
        };
        authorize(&actor, action, &Resource::Identity { id: target })?;
        let admin = actor.id().ok_or(AccessError::Forbidden)?;

        let mut identity = self
            .identities
            .find_by_id(target)
            .await?
            .ok_or(AdminError::UserNotFound)?;

        match command {
            AccountCommand::Suspend => identity
                .suspend(admin, Utc::now())
                .map_err(|_| AccessError::ForbiddenSelfAction)?,
            AccountCommand::Activate => identity.activate(),
        }

        let saved = self.repository.save_account_state(&identity).await?;
        let counts = self.identities.activity_counts(target).await?;

        tracing::info!(
            admin_id = %admin,
            user_id = %target,
            command = ?command,
            "account state changed"
        );

        Ok(ManagedUser {
            identity: saved,
            listing_count: counts.listings,
            saved_deal_count: counts.saved_deals,
        })
    }
}

#[async_trait]
impl<Q, R> DeleteUserUseCase for AccountModerationService<Q, R>
where
    Q: IdentityQuery + Send + Sync,
    R: IdentityRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, target: UserId) -> Result<(), AdminError> {
        authorize(&actor, Action::Delete, &Resource::Identity { id: target })?;

        self.repository.delete(target).await?;
        // Owned listings went with the account.
        self.cache.invalidate(&CacheNamespace::LISTING_WRITES).await;

        tracing::info!(admin_id = ?actor.id(), user_id = %target, "account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::shared::cache::InMemoryCacheStore;
    use crate::tests::support::fakes::InMemoryIdentities;
    use crate::tests::support::fixtures::identity;
    use std::sync::Arc;
    use uuid::Uuid;

    fn service(store: &InMemoryIdentities) -> AccountModerationService<InMemoryIdentities, InMemoryIdentities> {
        AccountModerationService::new(
            store.clone(),
            store.clone(),
            ResultCache::new(Arc::new(InMemoryCacheStore::new()), "test"),
        )
    }

    #[tokio::test]
    async fn suspend_stamps_the_admin_and_activate_clears_it() {
        let store = InMemoryIdentities::default();
        let admin = identity(Role::Admin);
        let member = identity(Role::Partner);
        store.insert(admin.clone(), "x");
        store.insert(member.clone(), "x");
        let svc = service(&store);

        let suspended = SetAccountStateUseCase::execute(
            &svc,
            admin.actor(),
            member.id,
            AccountCommand::Suspend,
        )
        .await
        .unwrap();
        assert!(suspended.identity.suspended);
        assert_eq!(suspended.identity.suspended_by, Some(admin.id));
        assert!(store.get(member.id).unwrap().suspended);

        let active = SetAccountStateUseCase::execute(
            &svc,
            admin.actor(),
            member.id,
            AccountCommand::Activate,
        )
        .await
        .unwrap();
        assert!(!active.identity.suspended);
        assert_eq!(active.identity.suspended_by, None);
        assert_eq!(active.identity.suspended_at, None);
    }

    #[tokio::test]
    async fn admin_cannot_suspend_or_delete_self() {
        let store = InMemoryIdentities::default();
        let admin = identity(Role::Admin);
        store.insert(admin.clone(), "x");
        let svc = service(&store);

        let suspend =
            SetAccountStateUseCase::execute(&svc, admin.actor(), admin.id, AccountCommand::Suspend)
                .await;
        assert!(matches!(
            suspend,
            Err(AdminError::Access(AccessError::ForbiddenSelfAction))
        ));

        let delete = DeleteUserUseCase::execute(&svc, admin.actor(), admin.id).await;
        assert!(matches!(
            delete,
            Err(AdminError::Access(AccessError::ForbiddenSelfAction))
        ));
        assert!(store.get(admin.id).is_some());
    }

    #[tokio::test]
    async fn non_admins_cannot_suspend() {
        let store = InMemoryIdentities::default();
        let distributor = identity(Role::Distribution);
        let member = identity(Role::User);
        store.insert(member.clone(), "x");

        let result = SetAccountStateUseCase::execute(
            &service(&store),
            distributor.actor(),
            member.id,
            AccountCommand::Suspend,
        )
        .await;

        assert!(matches!(result, Err(AdminError::Access(AccessError::Forbidden))));
    }

    #[tokio::test]
    async fn unknown_targets_are_not_found() {
        let store = InMemoryIdentities::default();
        let admin = identity(Role::Admin);
        let svc = service(&store);
        let ghost = UserId::from(Uuid::new_v4());

        let state =
            SetAccountStateUseCase::execute(&svc, admin.actor(), ghost, AccountCommand::Activate)
                .await;
        assert!(matches!(state, Err(AdminError::UserNotFound)));

        let delete = DeleteUserUseCase::execute(&svc, admin.actor(), ghost).await;
        assert!(matches!(delete, Err(AdminError::UserNotFound)));
    }

    #[tokio::test]
    async fn delete_removes_the_account() {
        let store = InMemoryIdentities::default();
        let admin = identity(Role::Admin);
        let member = identity(Role::User);
        store.insert(member.clone(), "x");

        DeleteUserUseCase::execute(&service(&store), admin.actor(), member.id)
            .await
            .unwrap();

        assert!(store.get(member.id).is_none());
    }
}
