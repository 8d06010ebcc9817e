use serde::Deserialize;
use serde_json::{json, Value};

use super::entities::{clamp_rating, Listing, ModerationStatus};
use crate::modules::auth::application::domain::entities::UserId;
use crate::shared::validation::{is_blank, ValidationErrors};

/// Owner-supplied fields for a new listing. `featured` and the moderation
/// status are not part of it; both are admin-controlled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub description: Option<String>,
    #[serde(default)]
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub image_url: Option<String>,
    pub has_deals: Option<bool>,
    pub deal_description: Option<String>,
    pub hours: Option<Value>,
    pub amenities: Option<Value>,
    pub gallery: Option<Value>,
}

/// A draft that passed validation, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub owner: UserId,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub image_url: Option<String>,
    pub has_deals: bool,
    pub deal_description: Option<String>,
    pub hours: Value,
    pub amenities: Value,
    pub gallery: Value,
    pub status: ModerationStatus,
}

/// Partial update. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub image_url: Option<String>,
    pub has_deals: Option<bool>,
    pub deal_description: Option<String>,
    pub hours: Option<Value>,
    pub amenities: Option<Value>,
    pub gallery: Option<Value>,
}

fn check_required(errors: &mut ValidationErrors, name: &str, category: &str, address: &str) {
    errors.check(is_blank(name), "Name can't be blank");
    errors.check(is_blank(category), "Category can't be blank");
    errors.check(is_blank(address), "Address can't be blank");
}

fn review_count(errors: &mut ValidationErrors, raw: Option<i64>) -> Option<u32> {
    let raw = raw?;
    match u32::try_from(raw) {
        Ok(count) => Some(count),
        Err(_) if raw < 0 => {
            errors.push("Review count must be greater than or equal to 0");
            None
        }
        Err(_) => Some(u32::MAX),
    }
}

impl ListingDraft {
    pub fn validate(
        self,
        owner: UserId,
        status: ModerationStatus,
    ) -> Result<NewListing, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, &self.name, &self.category, &self.address);
        let review_count = review_count(&mut errors, self.review_count).unwrap_or(0);

        errors.into_result(NewListing {
            owner,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            description: self.description,
            address: self.address.trim().to_string(),
            phone: self.phone,
            email: self.email,
            website: self.website,
            rating: clamp_rating(self.rating.unwrap_or(0.0)),
            review_count,
            image_url: self.image_url,
            has_deals: self.has_deals.unwrap_or(false),
            deal_description: self.deal_description,
            hours: self.hours.unwrap_or_else(|| json!({})),
            amenities: self.amenities.unwrap_or_else(|| json!([])),
            gallery: self.gallery.unwrap_or_else(|| json!([])),
            status,
        })
    }
}

impl ListingPatch {
    /// Returns the patched copy; every invalid field is reported together.
    pub fn apply_to(self, listing: &Listing) -> Result<Listing, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let review_count = review_count(&mut errors, self.review_count);

        let mut next = listing.clone();
        if let Some(name) = self.name {
            next.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            next.category = category.trim().to_string();
        }
        if let Some(address) = self.address {
            next.address = address.trim().to_string();
        }
        check_required(&mut errors, &next.name, &next.category, &next.address);

        if self.description.is_some() {
            next.description = self.description;
        }
        if self.phone.is_some() {
            next.phone = self.phone;
        }
        if self.email.is_some() {
            next.email = self.email;
        }
        if self.website.is_some() {
            next.website = self.website;
        }
        if let Some(rating) = self.rating {
            next.rating = clamp_rating(rating);
        }
        if let Some(count) = review_count {
            next.review_count = count;
        }
        if self.image_url.is_some() {
            next.image_url = self.image_url;
        }
        if let Some(has_deals) = self.has_deals {
            next.has_deals = has_deals;
        }
        if self.deal_description.is_some() {
            next.deal_description = self.deal_description;
        }
        if let Some(hours) = self.hours {
            next.hours = hours;
        }
        if let Some(amenities) = self.amenities {
            next.amenities = amenities;
        }
        if let Some(gallery) = self.gallery {
            next.gallery = gallery;
        }

        errors.into_result(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::fixtures::listing;
    use uuid::Uuid;

    fn owner() -> UserId {
        UserId::from(Uuid::new_v4())
    }

    #[test]
    fn draft_reports_every_missing_field() {
        let draft = ListingDraft {
            review_count: Some(-3),
            ..Default::default()
        };

        let errors = draft.validate(owner(), ModerationStatus::Pending).unwrap_err();
        assert_eq!(
            errors.messages(),
            &[
                "Name can't be blank".to_string(),
                "Category can't be blank".to_string(),
                "Address can't be blank".to_string(),
                "Review count must be greater than or equal to 0".to_string(),
            ]
        );
    }

    #[test]
    fn draft_clamps_rating_and_fills_defaults() {
        let draft = ListingDraft {
            name: "  Corner Bakery ".to_string(),
            category: "Food".to_string(),
            address: "1 Main St, Springfield".to_string(),
            rating: Some(9.0),
            ..Default::default()
        };

        let new = draft.validate(owner(), ModerationStatus::Pending).unwrap();
        assert_eq!(new.name, "Corner Bakery");
        assert_eq!(new.rating, 5.0);
        assert_eq!(new.review_count, 0);
        assert_eq!(new.hours, json!({}));
        assert_eq!(new.gallery, json!([]));
        assert_eq!(new.status, ModerationStatus::Pending);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let original = listing("Corner Bakery");
        let patch = ListingPatch {
            rating: Some(-2.0),
            has_deals: Some(true),
            deal_description: Some("2 for 1 croissants".to_string()),
            ..Default::default()
        };

        let patched = patch.apply_to(&original).unwrap();
        assert_eq!(patched.rating, 0.0);
        assert!(patched.has_deals);
        assert_eq!(patched.name, original.name);
        assert_eq!(patched.address, original.address);
    }

    #[test]
    fn patch_cannot_blank_a_required_field() {
        let original = listing("Corner Bakery");
        let patch = ListingPatch {
            name: Some("   ".to_string()),
            review_count: Some(-1),
            ..Default::default()
        };

        let errors = patch.apply_to(&original).unwrap_err();
        assert_eq!(errors.messages().len(), 2);
        assert!(errors.messages().contains(&"Name can't be blank".to_string()));
    }
}
