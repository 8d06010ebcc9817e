pub mod saved_deals;

pub use saved_deals::{
    list_saved_deals_handler, remove_saved_deal_handler, save_deal_handler,
    toggle_saved_deal_handler, SaveDealRequestDto, SavedDealMessage, SavedDealResponse,
    ToggleSavedDealResponse,
};
