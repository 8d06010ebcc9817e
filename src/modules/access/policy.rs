//! Role-based permission rules.
//!
//! Pure functions of `(actor, action, resource)`. Handlers and services never
//! inspect roles directly; they describe what they are about to do and ask
//! [`authorize`].

use crate::modules::auth::application::domain::entities::{Role, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Guest,
    Member { id: UserId, role: Role },
}

impl Actor {
    pub fn member(id: UserId, role: Role) -> Self {
        Actor::Member { id, role }
    }

    pub fn id(&self) -> Option<UserId> {
        match self {
            Actor::Guest => None,
            Actor::Member { id, .. } => Some(*id),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Actor::Guest => None,
            Actor::Member { role, .. } => Some(*role),
        }
    }

    fn owns(&self, owner: UserId) -> bool {
        self.id() == Some(owner)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    /// Record a view or click event.
    Track,
    /// Approve, reject or feature a listing.
    Moderate,
    Suspend,
    Activate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// `owner` is `None` for the collection itself (search, create).
    Listing { owner: Option<UserId> },
    Analytics { listing_owner: UserId },
    SavedMark { owner: UserId },
    Profile { owner: UserId },
    Identity { id: UserId },
    WhiteLabel { owner: UserId },
    AdminPanel,
    DistributionPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("You are not allowed to perform this action")]
    Forbidden,

    #[error("This action cannot be performed on your own account")]
    ForbiddenSelfAction,
}

pub fn can(actor: &Actor, action: Action, resource: &Resource) -> bool {
    authorize(actor, action, resource).is_ok()
}

pub fn authorize(actor: &Actor, action: Action, resource: &Resource) -> Result<(), AccessError> {
    // Layered over every role, the admin wildcard included.
    if let Resource::Identity { id } = resource {
        if matches!(action, Action::Suspend | Action::Delete) && actor.owns(*id) {
            return Err(AccessError::ForbiddenSelfAction);
        }
    }

    let allowed = match actor {
        Actor::Guest => public_rule(action, resource),
        Actor::Member { role, .. } => match role {
            Role::Admin => true,
            Role::Distribution => distribution_rule(actor, action, resource),
            Role::Partner => partner_rule(actor, action, resource),
            Role::User => member_rule(actor, action, resource),
        },
    };

    if allowed {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

fn public_rule(action: Action, resource: &Resource) -> bool {
    matches!(
        (action, resource),
        (Action::Read | Action::Track, Resource::Listing { .. })
    )
}

// Shared by every signed-in role.
fn member_rule(actor: &Actor, action: Action, resource: &Resource) -> bool {
    if public_rule(action, resource) {
        return true;
    }
    match resource {
        Resource::SavedMark { owner } | Resource::Profile { owner } => actor.owns(*owner),
        _ => false,
    }
}

fn partner_rule(actor: &Actor, action: Action, resource: &Resource) -> bool {
    if member_rule(actor, action, resource) {
        return true;
    }
    match (action, resource) {
        (Action::Create, Resource::Listing { .. }) => true,
        (Action::Update | Action::Delete, Resource::Listing { owner: Some(owner) }) => {
            actor.owns(*owner)
        }
        (Action::Read, Resource::Analytics { listing_owner }) => actor.owns(*listing_owner),
        _ => false,
    }
}

fn distribution_rule(actor: &Actor, action: Action, resource: &Resource) -> bool {
    if member_rule(actor, action, resource) {
        return true;
    }
    match (action, resource) {
        (Action::Moderate, _) => false,
        (_, Resource::Listing { .. }) => true,
        (Action::Read, Resource::Identity { .. }) => true,
        (_, Resource::WhiteLabel { owner }) => actor.owns(*owner),
        (Action::Read, Resource::DistributionPanel) => true,
        _ => false,
    }
}
