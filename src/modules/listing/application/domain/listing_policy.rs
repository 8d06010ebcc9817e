use std::env;

use super::entities::ModerationStatus;

/// Creation-time defaults for new listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPolicy {
    pub default_status: ModerationStatus,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            default_status: ModerationStatus::Pending,
        }
    }
}

impl ListingPolicy {
    /// Reads `LISTING_DEFAULT_MODERATION` (`pending` | `approved`).
    pub fn from_env() -> Self {
        match env::var("LISTING_DEFAULT_MODERATION") {
            Ok(raw) => Self::from_setting(&raw).unwrap_or_else(|| {
                panic!(
                    "LISTING_DEFAULT_MODERATION must be 'pending' or 'approved', got '{}'",
                    raw
                )
            }),
            Err(_) => Self::default(),
        }
    }

    fn from_setting(raw: &str) -> Option<Self> {
        match raw.trim().parse::<ModerationStatus>() {
            Ok(status @ (ModerationStatus::Pending | ModerationStatus::Approved)) => Some(Self {
                default_status: status,
            }),
            _ => None,
        }
    }
}
