mod saved_deal;

pub use saved_deal::{
    ListSavedDealsUseCase, RemoveSavedDealUseCase, SaveDealUseCase, SavedDealError,
    ToggleOutcome, ToggleSavedDealUseCase,
};
