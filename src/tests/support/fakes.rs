//! In-memory implementations of the outgoing ports.
//!
//! Every fake is `Clone` and shares its state between clones, so a test can
//! hand one copy to a service and keep another for assertions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::modules::admin::application::domain::overview::{
    ListingAdminFilter, ManagedUser, PlatformStats, UserFilter,
};
use crate::modules::admin::application::ports::outgoing::{AdminQuery, AdminQueryError};
use crate::modules::analytics::application::domain::events::{EventFilter, EventKind, TimeWindow};
use crate::modules::analytics::application::ports::outgoing::{EventStore, EventStoreError};
use crate::modules::auth::application::domain::entities::{Identity, Role, UserId};
use crate::modules::auth::application::ports::outgoing::{
    ActivityCounts, HashError, IdentityQuery, IdentityQueryError, IdentityRepository,
    IdentityRepositoryError, NewIdentity, PasswordHasher, ProfileChanges, StoredCredentials,
};
use crate::modules::distribution::application::domain::white_label::WhiteLabel;
use crate::modules::distribution::application::ports::outgoing::{
    WhiteLabelStore, WhiteLabelStoreError,
};
use crate::modules::listing::application::domain::entities::{
    Listing, ListingId, ListingOwner, Moderation, ModerationStatus,
};
use crate::modules::listing::application::domain::listing_draft::NewListing;
use crate::modules::listing::application::domain::search::{execute_plan, ListingSearch};
use crate::modules::listing::application::ports::outgoing::{
    ListingQuery, ListingQueryError, ListingRepository, ListingRepositoryError,
};
use crate::modules::saved_deal::application::ports::outgoing::{
    SavedDealStore, SavedDealStoreError,
};
use crate::shared::pagination::{Page, PageRequest};

fn newest_first<T>(rows: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    rows.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

fn page_of<T>(rows: Vec<T>, page: PageRequest) -> Page<T> {
    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.per_page as usize)
        .collect();
    Page::new(items, page, total)
}

//
// ──────────────────────────────────────────────────────────
// Identities
// ──────────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
pub struct InMemoryIdentities {
    records: Arc<Mutex<Vec<(Identity, String)>>>,
    counts: Arc<Mutex<HashMap<UserId, ActivityCounts>>>,
}

impl InMemoryIdentities {
    /// Inserts or replaces the identity with the given credential hash.
    pub fn insert(&self, identity: Identity, password_hash: &str) {
        let mut records = self.records.lock().unwrap();
        records.retain(|(existing, _)| existing.id != identity.id);
        records.push((identity, password_hash.to_string()));
    }

    pub fn get(&self, id: UserId) -> Option<Identity> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|(identity, _)| identity.id == id)
            .map(|(identity, _)| identity.clone())
    }

    pub fn hash_of(&self, id: UserId) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|(identity, _)| identity.id == id)
            .map(|(_, hash)| hash.clone())
    }

    pub fn set_counts(&self, id: UserId, counts: ActivityCounts) {
        self.counts.lock().unwrap().insert(id, counts);
    }

    pub fn all(&self) -> Vec<Identity> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(identity, _)| identity.clone())
            .collect()
    }

    fn credentials(&self, pred: impl Fn(&Identity) -> bool) -> Option<StoredCredentials> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|(identity, _)| pred(identity))
            .map(|(identity, hash)| StoredCredentials {
                identity: identity.clone(),
                password_hash: hash.clone(),
            })
    }

    fn modify(
        &self,
        id: UserId,
        change: impl FnOnce(&mut Identity, &mut String),
    ) -> Result<Identity, IdentityRepositoryError> {
        let mut records = self.records.lock().unwrap();
        let (identity, hash) = records
            .iter_mut()
            .find(|(identity, _)| identity.id == id)
            .ok_or(IdentityRepositoryError::NotFound)?;
        change(identity, hash);
        Ok(identity.clone())
    }
}

#[async_trait]
impl IdentityQuery for InMemoryIdentities {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, IdentityQueryError> {
        Ok(self.get(id))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, IdentityQueryError> {
        Ok(self.credentials(|identity| identity.email.eq_ignore_ascii_case(email)))
    }

    async fn find_credentials_by_id(
        &self,
        id: UserId,
    ) -> Result<Option<StoredCredentials>, IdentityQueryError> {
        Ok(self.credentials(|identity| identity.id == id))
    }

    async fn email_taken(
        &self,
        email: &str,
        except: Option<UserId>,
    ) -> Result<bool, IdentityQueryError> {
        Ok(self.all().iter().any(|identity| {
            identity.email.eq_ignore_ascii_case(email) && Some(identity.id) != except
        }))
    }

    async fn activity_counts(&self, id: UserId) -> Result<ActivityCounts, IdentityQueryError> {
        Ok(self
            .counts
            .lock()
            .unwrap()
            .get(&id)
            .copied()
            .unwrap_or_default())
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentities {
    async fn create(&self, data: NewIdentity) -> Result<Identity, IdentityRepositoryError> {
        if self.all().iter().any(|i| i.email == data.email) {
            return Err(IdentityRepositoryError::EmailAlreadyExists);
        }
        let identity = Identity {
            id: UserId::from(Uuid::new_v4()),
            name: data.name,
            email: data.email,
            role: data.role,
            suspended: false,
            suspended_by: None,
            suspended_at: None,
            created_at: Utc::now(),
        };
        self.insert(identity.clone(), &data.password_hash);
        Ok(identity)
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: ProfileChanges,
    ) -> Result<Identity, IdentityRepositoryError> {
        self.modify(id, |identity, _| {
            if let Some(name) = changes.name {
                identity.name = name;
            }
            if let Some(email) = changes.email {
                identity.email = email;
            }
        })
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: String,
    ) -> Result<(), IdentityRepositoryError> {
        self.modify(id, |_, hash| *hash = password_hash).map(|_| ())
    }

    async fn save_account_state(
        &self,
        identity: &Identity,
    ) -> Result<Identity, IdentityRepositoryError> {
        self.modify(identity.id, |stored, _| {
            stored.suspended = identity.suspended;
            stored.suspended_by = identity.suspended_by;
            stored.suspended_at = identity.suspended_at;
        })
    }

    async fn delete(&self, id: UserId) -> Result<(), IdentityRepositoryError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|(identity, _)| identity.id != id);
        if records.len() == before {
            return Err(IdentityRepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Reversible stand-in for Argon2; keeps service tests fast.
pub struct PlainHasher;

impl PlainHasher {
    pub fn digest(plain: &str) -> String {
        format!("plain${plain}")
    }
}

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, plain: &str) -> Result<String, HashError> {
        Ok(Self::digest(plain))
    }

    async fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashError> {
        Ok(Self::digest(plain) == hash)
    }
}

//
// ──────────────────────────────────────────────────────────
// Listings
// ──────────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
pub struct InMemoryListings {
    rows: Arc<Mutex<Vec<Listing>>>,
    searches: Arc<AtomicUsize>,
}

impl InMemoryListings {
    /// Inserts or replaces by id.
    pub fn insert(&self, listing: Listing) -> Listing {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|existing| existing.id != listing.id);
        rows.push(listing.clone());
        listing
    }

    pub fn get(&self, id: ListingId) -> Option<Listing> {
        self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<Listing> {
        self.rows.lock().unwrap().clone()
    }

    /// How many times the search port was hit; cache tests count on this.
    pub fn search_calls(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    fn owned_by(&self, owner: UserId) -> Vec<Listing> {
        let mut owned: Vec<Listing> = self
            .all()
            .into_iter()
            .filter(|l| l.owner_id() == owner)
            .collect();
        newest_first(&mut owned, |l| l.created_at);
        owned
    }
}

#[async_trait]
impl ListingQuery for InMemoryListings {
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, ListingQueryError> {
        Ok(self.get(id))
    }

    async fn find_many(&self, ids: &[ListingId]) -> Result<Vec<Listing>, ListingQueryError> {
        Ok(ids.iter().filter_map(|id| self.get(*id)).collect())
    }

    async fn search(&self, search: &ListingSearch) -> Result<Page<Listing>, ListingQueryError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(execute_plan(self.all(), search))
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Listing>, ListingQueryError> {
        Ok(self.owned_by(owner))
    }
}

#[async_trait]
impl ListingRepository for InMemoryListings {
    async fn create(&self, new: NewListing) -> Result<Listing, ListingRepositoryError> {
        let now = Utc::now();
        Ok(self.insert(Listing {
            id: ListingId::from(Uuid::new_v4()),
            owner: ListingOwner {
                id: new.owner,
                name: String::new(),
            },
            name: new.name,
            category: new.category,
            description: new.description,
            address: new.address,
            phone: new.phone,
            email: new.email,
            website: new.website,
            rating: new.rating,
            review_count: new.review_count,
            image_url: new.image_url,
            featured: false,
            has_deals: new.has_deals,
            deal_description: new.deal_description,
            hours: new.hours,
            amenities: new.amenities,
            gallery: new.gallery,
            moderation: Moderation::initial(new.status),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update(&self, listing: &Listing) -> Result<Listing, ListingRepositoryError> {
        if self.get(listing.id).is_none() {
            return Err(ListingRepositoryError::NotFound);
        }
        let mut updated = listing.clone();
        updated.updated_at = Utc::now();
        Ok(self.insert(updated))
    }

    async fn delete(&self, id: ListingId) -> Result<(), ListingRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| l.id != id);
        if rows.len() == before {
            return Err(ListingRepositoryError::NotFound);
        }
        Ok(())
    }
}

//
// ──────────────────────────────────────────────────────────
// Analytics events
// ──────────────────────────────────────────────────────────
//

/// Owner totals need to know who owns what; build with
/// [`InMemoryEvents::for_listings`] when a test counts per owner.
#[derive(Clone, Default)]
pub struct InMemoryEvents {
    events: Arc<Mutex<Vec<(ListingId, EventKind, DateTime<Utc>)>>>,
    listings: Option<InMemoryListings>,
}

impl InMemoryEvents {
    pub fn for_listings(listings: &InMemoryListings) -> Self {
        Self {
            events: Arc::default(),
            listings: Some(listings.clone()),
        }
    }

    fn tally(
        &self,
        wanted: impl Fn(ListingId) -> bool,
        filter: EventFilter,
        window: Option<TimeWindow>,
    ) -> u64 {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(listing, kind, at)| {
                wanted(*listing)
                    && filter.matches(kind)
                    && window.map_or(true, |w| w.contains(*at))
            })
            .count() as u64
    }
}

#[async_trait]
impl EventStore for InMemoryEvents {
    async fn record(
        &self,
        listing: ListingId,
        kind: EventKind,
        at: DateTime<Utc>,
    ) -> Result<(), EventStoreError> {
        self.events.lock().unwrap().push((listing, kind, at));
        Ok(())
    }

    async fn count(
        &self,
        listing: ListingId,
        filter: EventFilter,
        window: Option<TimeWindow>,
    ) -> Result<u64, EventStoreError> {
        Ok(self.tally(|id| id == listing, filter, window))
    }

    async fn count_for_owner(
        &self,
        owner: UserId,
        filter: EventFilter,
        window: Option<TimeWindow>,
    ) -> Result<u64, EventStoreError> {
        let Some(listings) = &self.listings else {
            return Ok(0);
        };
        let owned: Vec<ListingId> = listings.owned_by(owner).iter().map(|l| l.id).collect();
        Ok(self.tally(|id| owned.contains(&id), filter, window))
    }
}

//
// ──────────────────────────────────────────────────────────
// Saved deals
// ──────────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
pub struct InMemorySavedDeals {
    rows: Arc<Mutex<Vec<(UserId, ListingId, DateTime<Utc>)>>>,
}

impl InMemorySavedDeals {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn count_for(&self, owner: UserId) -> u64 {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(user, _, _)| *user == owner)
            .count() as u64
    }
}

#[async_trait]
impl SavedDealStore for InMemorySavedDeals {
    async fn listing_ids(&self, owner: UserId) -> Result<Vec<ListingId>, SavedDealStoreError> {
        // Insertion order stands in for created_at; saves within one test
        // can share a timestamp.
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|(user, _, _)| *user == owner)
            .map(|(_, listing, _)| *listing)
            .collect())
    }

    async fn contains(
        &self,
        owner: UserId,
        listing: ListingId,
    ) -> Result<bool, SavedDealStoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|(user, saved, _)| *user == owner && *saved == listing))
    }

    async fn insert(
        &self,
        owner: UserId,
        listing: ListingId,
        at: DateTime<Utc>,
    ) -> Result<(), SavedDealStoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|(user, saved, _)| *user == owner && *saved == listing)
        {
            return Err(SavedDealStoreError::AlreadySaved);
        }
        rows.push((owner, listing, at));
        Ok(())
    }

    async fn remove(&self, owner: UserId, listing: ListingId) -> Result<bool, SavedDealStoreError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(user, saved, _)| !(*user == owner && *saved == listing));
        Ok(rows.len() != before)
    }
}

//
// ──────────────────────────────────────────────────────────
// White labels
// ──────────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
pub struct InMemoryWhiteLabels {
    rows: Arc<Mutex<Vec<WhiteLabel>>>,
}

impl InMemoryWhiteLabels {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_unique(rows: &[WhiteLabel], profile: &WhiteLabel) -> Result<(), WhiteLabelStoreError> {
        let clash = |mine: &Option<String>, theirs: &Option<String>| {
            mine.is_some() && mine == theirs
        };
        for other in rows.iter().filter(|row| row.id != profile.id) {
            if clash(&profile.subdomain, &other.subdomain) {
                return Err(WhiteLabelStoreError::SubdomainTaken);
            }
            if clash(&profile.domain, &other.domain) {
                return Err(WhiteLabelStoreError::DomainTaken);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl WhiteLabelStore for InMemoryWhiteLabels {
    async fn find_by_owner(&self, owner: UserId) -> Result<Option<WhiteLabel>, WhiteLabelStoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.owner == owner)
            .cloned())
    }

    async fn insert(&self, profile: &WhiteLabel) -> Result<WhiteLabel, WhiteLabelStoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|row| row.owner == profile.owner) {
            return Err(WhiteLabelStoreError::AlreadyExists);
        }
        Self::check_unique(&rows, profile)?;
        rows.push(profile.clone());
        Ok(profile.clone())
    }

    async fn update(&self, profile: &WhiteLabel) -> Result<WhiteLabel, WhiteLabelStoreError> {
        let mut rows = self.rows.lock().unwrap();
        Self::check_unique(&rows, profile)?;
        let row = rows
            .iter_mut()
            .find(|row| row.id == profile.id)
            .ok_or(WhiteLabelStoreError::NotFound)?;
        *row = profile.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

//
// ──────────────────────────────────────────────────────────
// Admin read model
// ──────────────────────────────────────────────────────────
//

/// Answers the admin queries by scanning the other fakes.
#[derive(Clone)]
pub struct InMemoryAdminQuery {
    identities: InMemoryIdentities,
    listings: InMemoryListings,
    saved: InMemorySavedDeals,
}

impl InMemoryAdminQuery {
    pub fn new(
        identities: InMemoryIdentities,
        listings: InMemoryListings,
        saved: InMemorySavedDeals,
    ) -> Self {
        Self {
            identities,
            listings,
            saved,
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl AdminQuery for InMemoryAdminQuery {
    async fn platform_stats(&self, since: DateTime<Utc>) -> Result<PlatformStats, AdminQueryError> {
        let users = self.identities.all();
        let listings = self.listings.all();
        let with_role = |role: Role| users.iter().filter(|u| u.role == role).count() as u64;
        let listings_where =
            |pred: &dyn Fn(&Listing) -> bool| listings.iter().filter(|l| pred(l)).count() as u64;

        Ok(PlatformStats {
            total_users: users.len() as u64,
            total_businesses: listings.len() as u64,
            total_partners: with_role(Role::Partner),
            total_distribution_partners: with_role(Role::Distribution),
            total_admins: with_role(Role::Admin),
            featured_businesses: listings_where(&|l| l.featured),
            businesses_with_deals: listings_where(&|l| l.has_deals),
            total_saved_deals: self.saved.len() as u64,
            recent_signups: users.iter().filter(|u| u.created_at >= since).count() as u64,
            recent_businesses: listings_where(&|l| l.created_at >= since),
            pending_approvals: listings_where(&|l| l.moderation.is_pending()),
        })
    }

    async fn users(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<ManagedUser>, AdminQueryError> {
        let mut users: Vec<Identity> = self
            .identities
            .all()
            .into_iter()
            .filter(|u| filter.role.map_or(true, |role| u.role == role))
            .filter(|u| {
                filter.search.as_deref().map_or(true, |term| {
                    contains_ci(&u.name, term) || contains_ci(&u.email, term)
                })
            })
            .collect();
        newest_first(&mut users, |u| u.created_at);

        Ok(page_of(users, page).map(|identity| ManagedUser {
            listing_count: self.listings.owned_by(identity.id).len() as u64,
            saved_deal_count: self.saved.count_for(identity.id),
            identity,
        }))
    }

    async fn listing_ids(
        &self,
        filter: &ListingAdminFilter,
        page: PageRequest,
    ) -> Result<Page<ListingId>, AdminQueryError> {
        let mut rows: Vec<Listing> = self
            .listings
            .all()
            .into_iter()
            .filter(|l| {
                filter.search.as_deref().map_or(true, |term| {
                    contains_ci(&l.name, term)
                        || l.description.as_deref().is_some_and(|d| contains_ci(d, term))
                })
            })
            .filter(|l| filter.category.as_ref().map_or(true, |c| &l.category == c))
            .filter(|l| !filter.featured_only || l.featured)
            .filter(|l| filter.status.map_or(true, |s| l.moderation.status == s))
            .collect();
        newest_first(&mut rows, |l| l.created_at);

        Ok(page_of(rows, page).map(|l| l.id))
    }

    async fn pending_listing_ids(&self) -> Result<Vec<ListingId>, AdminQueryError> {
        let mut pending: Vec<Listing> = self
            .listings
            .all()
            .into_iter()
            .filter(|l| l.moderation.status == ModerationStatus::Pending)
            .collect();
        newest_first(&mut pending, |l| l.created_at);
        Ok(pending.into_iter().map(|l| l.id).collect())
    }
}
