//! Listing query plans.
//!
//! A [`ListingSearch`] is the full filter tuple plus the page being asked
//! for. The same plan drives the SQL adapter, the cache key and the
//! in-process ranking, so the three cannot drift apart.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::entities::Listing;
use crate::shared::cache::{CacheKey, CacheNamespace};
use crate::shared::pagination::{Page, PageRequest};

pub const AUTOCOMPLETE_LIMIT: u32 = 10;
pub const MIN_AUTOCOMPLETE_CHARS: usize = 2;

const EXACT_WORD_SCORE: u32 = 2;
const PREFIX_SCORE: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListingFilter {
    /// Trimmed and lowercased; blank input is `None`.
    pub query: Option<String>,
    pub category: Option<String>,
    pub featured_only: bool,
    pub has_deals_only: bool,
    /// Caps the ordered match set before pagination.
    pub limit: Option<u32>,
}

fn normalized(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ListingFilter {
    pub fn new(
        query: Option<&str>,
        category: Option<&str>,
        featured_only: bool,
        has_deals_only: bool,
        limit: Option<u32>,
    ) -> Self {
        Self {
            query: normalized(query).map(|q| q.to_lowercase()),
            category: normalized(category),
            featured_only,
            has_deals_only,
            limit,
        }
    }

    pub fn terms(&self) -> Vec<String> {
        self.query.as_deref().map(tokenize).unwrap_or_default()
    }

    /// A text query is present but has no searchable words.
    pub fn matches_nothing(&self) -> bool {
        self.query
            .as_deref()
            .is_some_and(|query| tokenize(query).is_empty())
    }

    /// The non-text predicates, ANDed.
    pub fn admits(&self, listing: &Listing) -> bool {
        if let Some(category) = &self.category {
            if &listing.category != category {
                return false;
            }
        }
        if self.featured_only && !listing.featured {
            return false;
        }
        if self.has_deals_only && !listing.has_deals {
            return false;
        }
        true
    }
}

/// Slice of the ordered match set a page covers, after the `limit` cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub total: u64,
    pub offset: u64,
    pub take: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingSearch {
    pub filter: ListingFilter,
    pub page: PageRequest,
}

impl ListingSearch {
    pub fn new(filter: ListingFilter, page: PageRequest) -> Self {
        Self { filter, page }
    }

    /// Fields are fed in a fixed order so equal plans always share a key.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::builder(CacheNamespace::ListingQueries)
            .field("q", self.filter.query.as_deref())
            .field("category", self.filter.category.as_deref())
            .flag("featured", self.filter.featured_only)
            .flag("deals", self.filter.has_deals_only)
            .field("limit", self.filter.limit)
            .field("page", Some(self.page.page))
            .field("per_page", Some(self.page.per_page))
            .build()
    }

    pub fn window(&self, matches: u64) -> SearchWindow {
        let total = match self.filter.limit {
            Some(limit) => matches.min(u64::from(limit)),
            None => matches,
        };
        let offset = self.page.offset();
        let take = total
            .saturating_sub(offset)
            .min(u64::from(self.page.per_page));

        SearchWindow {
            total,
            offset,
            take,
        }
    }
}

/// Lowercased alphanumeric words, deduplicated, in first-seen order.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        if !tokens.contains(&word) {
            tokens.push(word);
        }
    }
    tokens
}

/// Sum over query terms of the best match in `haystack`: an exact word
/// scores 2, a word starting with the term scores 1. Zero means no match.
pub fn relevance(terms: &[String], haystack: &str) -> u32 {
    let words = tokenize(haystack);
    terms
        .iter()
        .map(|term| {
            words
                .iter()
                .map(|word| {
                    if word == term {
                        EXACT_WORD_SCORE
                    } else if word.starts_with(term.as_str()) {
                        PREFIX_SCORE
                    } else {
                        0
                    }
                })
                .max()
                .unwrap_or(0)
        })
        .sum()
}

fn newest_first(a: &Listing, b: &Listing) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Runs a plan over an in-memory candidate set.
///
/// With a text query, listings that score zero are dropped and the rest are
/// ordered by score descending (newest first on ties). A query made only of
/// punctuation matches nothing. Without a query, the order is newest first.
pub fn execute_plan<I>(candidates: I, search: &ListingSearch) -> Page<Listing>
where
    I: IntoIterator<Item = Listing>,
{
    let terms = search.filter.terms();
    let admitted = candidates
        .into_iter()
        .filter(|listing| search.filter.admits(listing));

    let ordered: Vec<Listing> = if search.filter.matches_nothing() {
        Vec::new()
    } else if terms.is_empty() {
        let mut all: Vec<Listing> = admitted.collect();
        all.sort_by(newest_first);
        all
    } else {
        let mut scored: Vec<(u32, Listing)> = admitted
            .map(|listing| (relevance(&terms, &listing.searchable_text()), listing))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| newest_first(a, b)));
        scored.into_iter().map(|(_, listing)| listing).collect()
    };

    let window = search.window(ordered.len() as u64);
    let items = ordered
        .into_iter()
        .skip(window.offset as usize)
        .take(window.take as usize)
        .collect();

    Page::new(items, search.page, window.total)
}

/// Minimum-length check; `None` means answer with an empty list and skip
/// the search entirely. Input without any word characters is refused too.
pub fn autocomplete_query(raw: &str) -> Option<String> {
    let query = raw.trim().to_lowercase();
    (query.chars().count() >= MIN_AUTOCOMPLETE_CHARS && !tokenize(&query).is_empty())
        .then_some(query)
}

pub fn autocomplete_search(query: &str) -> ListingSearch {
    ListingSearch::new(
        ListingFilter::new(Some(query), None, false, false, Some(AUTOCOMPLETE_LIMIT)),
        PageRequest::new(Some(1), Some(AUTOCOMPLETE_LIMIT)),
    )
}

pub fn autocomplete_cache_key(query: &str) -> CacheKey {
    CacheKey::builder(CacheNamespace::Autocomplete)
        .field("q", Some(query))
        .build()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub category: String,
    pub location: Option<String>,
}

impl From<&Listing> for Suggestion {
    fn from(listing: &Listing) -> Self {
        Self {
            name: listing.name.clone(),
            category: listing.category.clone(),
            location: listing.location(),
        }
    }
}
