mod listing;

pub use listing::{
    AutocompleteUseCase, CreateListingUseCase, DeleteListingUseCase, GetListingUseCase,
    ListingError, ModerateListingUseCase, ModerationCommand, MyListingsUseCase,
    SearchListingsUseCase, UpdateListingUseCase,
};
