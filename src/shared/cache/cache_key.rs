use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Invalidation namespaces. A listing write sweeps every key under both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    ListingQueries,
    Autocomplete,
}

impl CacheNamespace {
    pub const LISTING_WRITES: [CacheNamespace; 2] =
        [CacheNamespace::ListingQueries, CacheNamespace::Autocomplete];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheNamespace::ListingQueries => "listing_queries",
            CacheNamespace::Autocomplete => "autocomplete",
        }
    }

    /// Storage prefix shared by every key in the namespace.
    pub fn storage_prefix(&self, key_prefix: &str) -> String {
        format!("{}:{}:", key_prefix, self.as_str())
    }
}

/// Deterministic key for one filter tuple.
///
/// The canonical form is `name=value` pairs joined by `&` in the order the
/// builder was fed. Callers always feed fields in a fixed order, so two equal
/// tuples produce the same key no matter how the request spelled them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: CacheNamespace,
    canonical: String,
}

impl CacheKey {
    pub fn builder(namespace: CacheNamespace) -> CacheKeyBuilder {
        CacheKeyBuilder {
            namespace,
            parts: Vec::new(),
        }
    }

    pub fn namespace(&self) -> CacheNamespace {
        self.namespace
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// `{prefix}:{namespace}:{sha256(canonical)}`; bounded length for any input.
    pub fn storage_key(&self, key_prefix: &str) -> String {
        let digest = Sha256::digest(self.canonical.as_bytes());
        format!("{}{:x}", self.namespace.storage_prefix(key_prefix), digest)
    }
}

pub struct CacheKeyBuilder {
    namespace: CacheNamespace,
    parts: Vec<String>,
}

impl CacheKeyBuilder {
    /// Adds `name=value`; absent values are omitted entirely.
    pub fn field<V: Display>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.parts
                .push(format!("{}={}", name, escape(&value.to_string())));
        }
        self
    }

    /// Adds `name=true` only when the flag is on.
    pub fn flag(self, name: &str, on: bool) -> Self {
        self.field(name, on.then_some("true"))
    }

    pub fn build(self) -> CacheKey {
        CacheKey {
            namespace: self.namespace,
            canonical: self.parts.join("&"),
        }
    }
}

// Values must not be able to forge a separator.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let key = CacheKey::builder(CacheNamespace::ListingQueries)
            .field("q", Some("pizza"))
            .field::<&str>("category", None)
            .flag("featured", false)
            .flag("deals", true)
            .build();

        assert_eq!(key.canonical(), "q=pizza&deals=true");
    }

    #[test]
    fn present_and_absent_fields_never_collide() {
        let with_category = CacheKey::builder(CacheNamespace::ListingQueries)
            .field("category", Some("food"))
            .build();
        let without = CacheKey::builder(CacheNamespace::ListingQueries).build();

        assert_ne!(with_category, without);
        assert_ne!(
            with_category.storage_key("test"),
            without.storage_key("test")
        );
    }

    #[test]
    fn values_cannot_forge_separators() {
        let forged = CacheKey::builder(CacheNamespace::ListingQueries)
            .field("q", Some("a&category=food"))
            .build();
        let real = CacheKey::builder(CacheNamespace::ListingQueries)
            .field("q", Some("a"))
            .field("category", Some("food"))
            .build();

        assert_ne!(forged.canonical(), real.canonical());
    }

    #[test]
    fn namespaces_partition_identical_tuples() {
        let a = CacheKey::builder(CacheNamespace::ListingQueries)
            .field("q", Some("pi"))
            .build();
        let b = CacheKey::builder(CacheNamespace::Autocomplete)
            .field("q", Some("pi"))
            .build();

        assert_eq!(a.canonical(), b.canonical());
        assert_ne!(a.storage_key("p"), b.storage_key("p"));
        assert!(a.storage_key("p").starts_with("p:listing_queries:"));
        assert!(b.storage_key("p").starts_with("p:autocomplete:"));
    }
}
