use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::modules::access::{authorize, AccessError, Action, Actor, Resource};
use crate::modules::auth::application::ports::outgoing::IdentityQuery;
use crate::modules::distribution::application::domain::white_label::{
    WhiteLabel, WhiteLabelPatch,
};
use crate::modules::distribution::application::ports::incoming::use_cases::{
    DistributionError, GetWhiteLabelUseCase, UpdateWhiteLabelUseCase,
};
use crate::modules::distribution::application::ports::outgoing::{
    WhiteLabelStore, WhiteLabelStoreError,
};

pub struct WhiteLabelService<W, I>
where
    W: WhiteLabelStore,
    I: IdentityQuery,
{
    store: Arc<W>,
    identities: Arc<I>,
}

impl<W, I> WhiteLabelService<W, I>
where
    W: WhiteLabelStore,
    I: IdentityQuery,
{
    pub fn new(store: Arc<W>, identities: Arc<I>) -> Self {
        Self { store, identities }
    }

    /// The caller's profile, created with the caller's name as brand on
    /// first access.
    async fn load_or_create(&self, actor: &Actor, action: Action) -> Result<WhiteLabel, DistributionError> {
        let owner = actor.id().ok_or(AccessError::Forbidden)?;
        authorize(actor, action, &Resource::WhiteLabel { owner })?;

        if let Some(existing) = self.store.find_by_owner(owner).await? {
            return Ok(existing);
        }

        let name = self
            .identities
            .find_by_id(owner)
            .await?
            .map(|identity| identity.name)
            .ok_or_else(|| DistributionError::Internal(format!("identity {owner} not found")))?;

        match self.store.insert(&WhiteLabel::new(owner, name, Utc::now())).await {
            Ok(created) => {
                tracing::info!(user_id = %owner, "white label created");
                Ok(created)
            }
            // Lost a race with a concurrent first access.
            Err(WhiteLabelStoreError::AlreadyExists) => self
                .store
                .find_by_owner(owner)
                .await?
                .ok_or_else(|| WhiteLabelStoreError::NotFound.into()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<W, I> GetWhiteLabelUseCase for WhiteLabelService<W, I>
where
    W: WhiteLabelStore + Send + Sync,
    I: IdentityQuery + Send + Sync,
{
    async fn execute(&self, actor: Actor) -> Result<WhiteLabel, DistributionError> {
        self.load_or_create(&actor, Action::Read).await
    }
}

#[async_trait]
impl<W, I> UpdateWhiteLabelUseCase for WhiteLabelService<W, I>
where
    W: WhiteLabelStore + Send + Sync,
    I: IdentityQuery + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        patch: WhiteLabelPatch,
    ) -> Result<WhiteLabel, DistributionError> {
        let mut profile = self.load_or_create(&actor, Action::Update).await?;

        patch
            .apply_to(&mut profile)
            .map_err(DistributionError::ValidationFailed)?;

        let saved = self.store.update(&profile).await?;
        tracing::info!(user_id = %saved.owner, "white label updated");
        Ok(saved)
    }
}
