use std::sync::Arc;

use crate::modules::saved_deal::application::ports::incoming::use_cases::{
    ListSavedDealsUseCase, RemoveSavedDealUseCase, SaveDealUseCase, ToggleSavedDealUseCase,
};

#[derive(Clone)]
pub struct SavedDealUseCases {
    pub list: Arc<dyn ListSavedDealsUseCase + Send + Sync>,
    pub save: Arc<dyn SaveDealUseCase + Send + Sync>,
    pub remove: Arc<dyn RemoveSavedDealUseCase + Send + Sync>,
    pub toggle: Arc<dyn ToggleSavedDealUseCase + Send + Sync>,
}
