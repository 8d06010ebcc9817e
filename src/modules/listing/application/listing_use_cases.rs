use std::sync::Arc;

use crate::modules::listing::application::ports::incoming::use_cases::{
    AutocompleteUseCase, CreateListingUseCase, DeleteListingUseCase, GetListingUseCase,
    ModerateListingUseCase, MyListingsUseCase, SearchListingsUseCase, UpdateListingUseCase,
};

#[derive(Clone)]
pub struct ListingUseCases {
    pub search: Arc<dyn SearchListingsUseCase + Send + Sync>,
    pub autocomplete: Arc<dyn AutocompleteUseCase + Send + Sync>,
    pub get: Arc<dyn GetListingUseCase + Send + Sync>,
    pub mine: Arc<dyn MyListingsUseCase + Send + Sync>,
    pub create: Arc<dyn CreateListingUseCase + Send + Sync>,
    pub update: Arc<dyn UpdateListingUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteListingUseCase + Send + Sync>,
    pub moderate: Arc<dyn ModerateListingUseCase + Send + Sync>,
}
