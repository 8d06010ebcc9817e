use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::application::domain::entities::{Identity, Role, UserId};
use crate::modules::auth::application::ports::outgoing::TokenProvider;
use crate::modules::listing::application::domain::entities::{
    Listing, ListingId, ListingOwner, Moderation, ModerationStatus,
};

const TEST_SECRET: &str = "test-secret-key-that-is-long-enough-for-hs256";

pub fn test_token_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: TEST_SECRET.to_string(),
        issuer: "bizdir-test".to_string(),
        access_token_expiry: 3600,
    })
}

/// `Authorization` header value for `who`, signed with the test key.
pub fn bearer(who: &Identity) -> String {
    let token = test_token_service()
        .issue_access_token(who.id)
        .expect("test token");
    format!("Bearer {token}")
}

/// Active account with a unique lowercase email.
pub fn identity(role: Role) -> Identity {
    let id = Uuid::new_v4();
    Identity {
        id: UserId::from(id),
        name: format!("Test {}", role.as_str()),
        email: format!("{}-{}@example.com", role.as_str(), id.simple()),
        role,
        suspended: false,
        suspended_by: None,
        suspended_at: None,
        created_at: Utc::now(),
    }
}

/// Pending listing with a random owner.
pub fn listing(name: &str) -> Listing {
    listing_owned_by(name, UserId::from(Uuid::new_v4()))
}

pub fn listing_owned_by(name: &str, owner: UserId) -> Listing {
    let now = Utc::now();
    Listing {
        id: ListingId::from(Uuid::new_v4()),
        owner: ListingOwner {
            id: owner,
            name: "Pat Owner".to_string(),
        },
        name: name.to_string(),
        category: "General".to_string(),
        description: None,
        address: "1 Main St, Springfield".to_string(),
        phone: None,
        email: None,
        website: None,
        rating: 0.0,
        review_count: 0,
        image_url: None,
        featured: false,
        has_deals: false,
        deal_description: None,
        hours: json!({}),
        amenities: json!([]),
        gallery: json!([]),
        moderation: Moderation::initial(ModerationStatus::Pending),
        created_at: now,
        updated_at: now,
    }
}

/// `Shop 0` .. `Shop n-1`, each a minute newer than the one before.
pub fn seeded_listings(n: usize) -> Vec<Listing> {
    let base = Utc::now() - Duration::days(1);
    (0..n)
        .map(|i| {
            let mut l = listing(&format!("Shop {i}"));
            l.created_at = base + Duration::minutes(i as i64);
            l.updated_at = l.created_at;
            l
        })
        .collect()
}
