use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserId;
use crate::shared::validation::{is_blank, ValidationErrors};

/// Settings a freshly created profile starts with.
pub fn default_settings() -> Value {
    json!({
        "enable_community_accounts": true,
        "enable_save_deals": true,
        "enable_messages": false,
        "custom_categories": [],
        "header_menu": [],
        "footer_menu": [],
    })
}

/// Branding for a distribution partner's white-labelled directory. One per
/// owner.
#[derive(Debug, Clone, PartialEq)]
pub struct WhiteLabel {
    pub id: Uuid,
    pub owner: UserId,
    pub brand_name: String,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub custom_css: Option<String>,
    pub settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WhiteLabel {
    pub fn new(owner: UserId, brand_name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            brand_name,
            domain: None,
            subdomain: None,
            logo_url: None,
            primary_color: None,
            secondary_color: None,
            custom_css: None,
            settings: default_settings(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Absent fields are left alone. Blank `domain`/`subdomain` clear the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhiteLabelPatch {
    pub brand_name: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub custom_css: Option<String>,
    /// Merged key by key onto the current settings.
    pub settings: Option<Map<String, Value>>,
}

static SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").expect("valid subdomain pattern")
});

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$")
        .expect("valid domain pattern")
});

/// Trimmed and lowercased; `None` when blank.
fn host_part(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_ascii_lowercase())
}

impl WhiteLabelPatch {
    pub fn apply_to(self, profile: &mut WhiteLabel) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(name) = &self.brand_name {
            errors.check(is_blank(name), "Brand name can't be blank");
        }
        let domain = self.domain.as_deref().map(host_part);
        if let Some(Some(domain)) = &domain {
            errors.check(!DOMAIN.is_match(domain), "Domain is invalid");
        }
        let subdomain = self.subdomain.as_deref().map(host_part);
        if let Some(Some(subdomain)) = &subdomain {
            errors.check(!SUBDOMAIN.is_match(subdomain), "Subdomain is invalid");
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(name) = self.brand_name {
            profile.brand_name = name.trim().to_string();
        }
        if let Some(domain) = domain {
            profile.domain = domain;
        }
        if let Some(subdomain) = subdomain {
            profile.subdomain = subdomain;
        }
        if let Some(logo_url) = self.logo_url {
            profile.logo_url = Some(logo_url);
        }
        if let Some(color) = self.primary_color {
            profile.primary_color = Some(color);
        }
        if let Some(color) = self.secondary_color {
            profile.secondary_color = Some(color);
        }
        if let Some(css) = self.custom_css {
            profile.custom_css = Some(css);
        }
        if let Some(changes) = self.settings {
            let mut merged = match std::mem::take(&mut profile.settings) {
                Value::Object(current) => current,
                _ => match default_settings() {
                    Value::Object(defaults) => defaults,
                    _ => Map::new(),
                },
            };
            merged.extend(changes);
            profile.settings = Value::Object(merged);
        }

        Ok(())
    }
}
