use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::modules::access::Actor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Partner,
    Distribution,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Partner => "partner",
            Role::Distribution => "distribution",
            Role::Admin => "admin",
        }
    }

    /// Roles a visitor may pick for themselves at signup.
    pub fn is_self_assignable(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "partner" => Ok(Role::Partner),
            "distribution" => Ok(Role::Distribution),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountStateError {
    #[error("An account cannot suspend itself")]
    SelfSuspension,
}

/// An account as seen by the rest of the system. Never carries the
/// credential hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub suspended: bool,
    pub suspended_by: Option<UserId>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn actor(&self) -> Actor {
        Actor::member(self.id, self.role)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn suspend(&mut self, actor: UserId, at: DateTime<Utc>) -> Result<(), AccountStateError> {
        if actor == self.id {
            return Err(AccountStateError::SelfSuspension);
        }
        self.suspended = true;
        self.suspended_by = Some(actor);
        self.suspended_at = Some(at);
        Ok(())
    }

    pub fn activate(&mut self) {
        self.suspended = false;
        self.suspended_by = None;
        self.suspended_at = None;
    }
}
