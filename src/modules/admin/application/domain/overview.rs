use serde::Serialize;

use crate::modules::auth::application::domain::entities::{Identity, Role};
use crate::modules::listing::application::domain::entities::ModerationStatus;

/// Window for the "recent" counters.
pub const RECENT_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_businesses: u64,
    pub total_partners: u64,
    pub total_distribution_partners: u64,
    pub total_admins: u64,
    pub featured_businesses: u64,
    pub businesses_with_deals: u64,
    pub total_saved_deals: u64,
    pub recent_signups: u64,
    pub recent_businesses: u64,
    pub pending_approvals: u64,
}

/// Newest accounts first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of name or email.
    pub search: Option<String>,
    pub role: Option<Role>,
}

/// Newest listings first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingAdminFilter {
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    pub category: Option<String>,
    pub featured_only: bool,
    pub status: Option<ModerationStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManagedUser {
    pub identity: Identity,
    pub listing_count: u64,
    pub saved_deal_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCommand {
    Suspend,
    Activate,
}

/// Escapes LIKE wildcards and wraps the term for a substring match.
pub fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
