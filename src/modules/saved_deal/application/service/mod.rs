mod saved_deal_service;

pub use saved_deal_service::SavedDealService;
