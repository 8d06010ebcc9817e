pub mod entities;
pub mod listing_draft;
pub mod listing_policy;
pub mod search;
