use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::modules::listing::application::domain::entities::Listing;
use crate::modules::listing::application::domain::search::{
    autocomplete_cache_key, autocomplete_query, autocomplete_search, ListingSearch, Suggestion,
};
use crate::modules::listing::application::ports::incoming::use_cases::{
    AutocompleteUseCase, ListingError, SearchListingsUseCase,
};
use crate::modules::listing::application::ports::outgoing::ListingQuery;
use crate::shared::cache::{CacheConfig, ResultCache};
use crate::shared::pagination::Page;

/// Public search and autocomplete, both memoized in the result cache.
pub struct ListingSearchService<Q>
where
    Q: ListingQuery,
{
    listings: Arc<Q>,
    cache: ResultCache,
    listing_ttl: Duration,
    autocomplete_ttl: Duration,
}

impl<Q> ListingSearchService<Q>
where
    Q: ListingQuery,
{
    pub fn new(listings: Arc<Q>, cache: ResultCache, config: &CacheConfig) -> Self {
        Self {
            listings,
            cache,
            listing_ttl: config.listing_ttl,
            autocomplete_ttl: config.autocomplete_ttl,
        }
    }
}

#[async_trait]
impl<Q> SearchListingsUseCase for ListingSearchService<Q>
where
    Q: ListingQuery + Send + Sync,
{
    async fn execute(&self, search: ListingSearch) -> Result<Page<Listing>, ListingError> {
        let key = search.cache_key();
        let listings = self.listings.clone();

        self.cache
            .fetch(&key, self.listing_ttl, || async move {
                listings.search(&search).await.map_err(ListingError::from)
            })
            .await
    }
}

#[async_trait]
impl<Q> AutocompleteUseCase for ListingSearchService<Q>
where
    Q: ListingQuery + Send + Sync,
{
    async fn execute(&self, query: &str) -> Result<Vec<Suggestion>, ListingError> {
        let Some(query) = autocomplete_query(query) else {
            return Ok(Vec::new());
        };

        let key = autocomplete_cache_key(&query);
        let listings = self.listings.clone();

        self.cache
            .fetch(&key, self.autocomplete_ttl, || async move {
                let page = listings
                    .search(&autocomplete_search(&query))
                    .await
                    .map_err(ListingError::from)?;
                Ok(page.items.iter().map(Suggestion::from).collect())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::listing::application::domain::search::{ListingFilter, AUTOCOMPLETE_LIMIT};
    use crate::shared::cache::{CacheNamespace, InMemoryCacheStore};
    use crate::shared::pagination::PageRequest;
    use crate::tests::support::fakes::InMemoryListings;
    use crate::tests::support::fixtures::{listing, seeded_listings};

    fn service(listings: InMemoryListings) -> ListingSearchService<InMemoryListings> {
        let cache = ResultCache::new(Arc::new(InMemoryCacheStore::new()), "test");
        ListingSearchService::new(Arc::new(listings), cache, &CacheConfig::default())
    }

    fn everything() -> ListingSearch {
        ListingSearch::new(ListingFilter::default(), PageRequest::default())
    }

    #[tokio::test]
    async fn identical_searches_are_served_from_cache() {
        let listings = InMemoryListings::default();
        listings.insert(listing("Corner Bakery"));
        let svc = service(listings.clone());

        SearchListingsUseCase::execute(&svc, everything()).await.unwrap();
        SearchListingsUseCase::execute(&svc, everything()).await.unwrap();

        assert_eq!(listings.search_calls(), 1);
    }

    #[tokio::test]
    async fn sweeping_the_namespace_forces_a_recompute() {
        let listings = InMemoryListings::default();
        listings.insert(listing("Corner Bakery"));
        let cache = ResultCache::new(Arc::new(InMemoryCacheStore::new()), "test");
        let svc = ListingSearchService::new(
            Arc::new(listings.clone()),
            cache.clone(),
            &CacheConfig::default(),
        );

        let first = SearchListingsUseCase::execute(&svc, everything()).await.unwrap();
        listings.insert(listing("Hardware Hub"));
        let stale = SearchListingsUseCase::execute(&svc, everything()).await.unwrap();
        assert_eq!(stale.items.len(), first.items.len());

        cache.invalidate(&CacheNamespace::LISTING_WRITES).await;
        let fresh = SearchListingsUseCase::execute(&svc, everything()).await.unwrap();
        assert_eq!(fresh.items.len(), 2);
    }

    #[tokio::test]
    async fn one_character_autocomplete_never_searches() {
        let listings = InMemoryListings::default();
        listings.insert(listing("Pizza Palace"));
        let svc = service(listings.clone());

        let suggestions = AutocompleteUseCase::execute(&svc, "p").await.unwrap();

        assert!(suggestions.is_empty());
        assert_eq!(listings.search_calls(), 0);
    }

    #[tokio::test]
    async fn punctuation_only_autocomplete_never_searches() {
        let listings = InMemoryListings::default();
        for l in seeded_listings(5) {
            listings.insert(l);
        }
        let svc = service(listings.clone());

        let suggestions = AutocompleteUseCase::execute(&svc, "--").await.unwrap();

        assert!(suggestions.is_empty());
        assert_eq!(listings.search_calls(), 0);
    }

    #[tokio::test]
    async fn punctuation_only_search_finds_nothing() {
        let listings = InMemoryListings::default();
        for l in seeded_listings(5) {
            listings.insert(l);
        }
        let svc = service(listings);

        let page = SearchListingsUseCase::execute(
            &svc,
            ListingSearch::new(
                ListingFilter::new(Some("!!!"), None, false, false, None),
                PageRequest::default(),
            ),
        )
        .await
        .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_count, 0);
    }

    #[tokio::test]
    async fn autocomplete_caps_results_and_derives_location() {
        let listings = InMemoryListings::default();
        for mut l in seeded_listings(15) {
            l.name = format!("Pizza {}", l.name);
            l.address = "4 Elm St, Springfield".to_string();
            listings.insert(l);
        }
        let svc = service(listings);

        let suggestions = AutocompleteUseCase::execute(&svc, "pi").await.unwrap();

        assert_eq!(suggestions.len(), AUTOCOMPLETE_LIMIT as usize);
        assert_eq!(suggestions[0].location.as_deref(), Some("Springfield"));
    }
}
