mod saved_deal_store;

pub use saved_deal_store::{SavedDealStore, SavedDealStoreError};
