pub mod access;
pub mod admin;
pub mod analytics;
pub mod auth;
pub mod distribution;
pub mod listing;
pub mod saved_deal;
