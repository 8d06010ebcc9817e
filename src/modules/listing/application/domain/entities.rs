use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserId;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ListingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ListingId> for Uuid {
    fn from(id: ListingId) -> Self {
        id.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Out-of-range and non-finite ratings are pulled back into `[0, 5]`.
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        return MIN_RATING;
    }
    rating.clamp(MIN_RATING, MAX_RATING)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown approval status: {0}")]
pub struct UnknownModerationStatus(pub String);

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ModerationStatus {
    type Err = UnknownModerationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "rejected" => Ok(ModerationStatus::Rejected),
            other => Err(UnknownModerationStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation lifecycle. No state is terminal: an admin may move a listing
/// between approved and rejected in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moderation {
    pub status: ModerationStatus,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl Moderation {
    pub fn initial(status: ModerationStatus) -> Self {
        Self {
            status,
            approved_by: None,
            approved_at: None,
        }
    }

    pub fn approve(&mut self, by: UserId, at: DateTime<Utc>) {
        self.status = ModerationStatus::Approved;
        self.approved_by = Some(by);
        self.approved_at = Some(at);
    }

    /// Keeps any earlier approval stamp.
    pub fn reject(&mut self) {
        self.status = ModerationStatus::Rejected;
    }

    pub fn is_pending(&self) -> bool {
        self.status == ModerationStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingOwner {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub owner: ListingOwner,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub image_url: Option<String>,
    pub featured: bool,
    pub has_deals: bool,
    pub deal_description: Option<String>,
    pub hours: serde_json::Value,
    pub amenities: serde_json::Value,
    pub gallery: serde_json::Value,
    pub moderation: Moderation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn owner_id(&self) -> UserId {
        self.owner.id
    }

    /// Last comma-separated segment of the address, trimmed.
    pub fn location(&self) -> Option<String> {
        self.address
            .rsplit(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Text the relevance ranking runs against.
    pub fn searchable_text(&self) -> String {
        [
            Some(self.name.as_str()),
            self.description.as_deref(),
            Some(self.category.as_str()),
            Some(self.address.as_str()),
            self.deal_description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    pub fn toggle_featured(&mut self) {
        self.featured = !self.featured;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::fixtures::listing;

    #[test]
    fn rating_is_clamped_into_range() {
        assert_eq!(clamp_rating(7.5), 5.0);
        assert_eq!(clamp_rating(-1.0), 0.0);
        assert_eq!(clamp_rating(3.2), 3.2);
        assert_eq!(clamp_rating(f64::NAN), 0.0);
    }

    #[test]
    fn approve_stamps_and_reject_keeps_the_stamp() {
        let mut moderation = Moderation::initial(ModerationStatus::Pending);
        let admin = UserId::from(Uuid::new_v4());
        let at = Utc::now();

        moderation.approve(admin, at);
        assert_eq!(moderation.status, ModerationStatus::Approved);
        assert_eq!(moderation.approved_by, Some(admin));

        moderation.reject();
        assert_eq!(moderation.status, ModerationStatus::Rejected);
        assert_eq!(moderation.approved_by, Some(admin));
        assert_eq!(moderation.approved_at, Some(at));

        moderation.approve(admin, at);
        assert_eq!(moderation.status, ModerationStatus::Approved);
    }

    #[test]
    fn location_is_the_last_address_segment() {
        let mut l = listing("Bakery");
        l.address = "12 Main St, Springfield, IL ".to_string();
        assert_eq!(l.location().as_deref(), Some("IL"));

        l.address = "Springfield".to_string();
        assert_eq!(l.location().as_deref(), Some("Springfield"));

        l.address = "12 Main St,".to_string();
        assert_eq!(l.location(), None);
    }

    #[test]
    fn statuses_parse_from_wire_names() {
        assert_eq!("approved".parse::<ModerationStatus>(), Ok(ModerationStatus::Approved));
        assert!("archived".parse::<ModerationStatus>().is_err());
    }
}
