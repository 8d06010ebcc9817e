pub mod saved_deals;
