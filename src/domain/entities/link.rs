//! Link entity representing a domain-scoped short code mapping.

/// A stored mapping from a short code to its original URL.
///
/// Mappings are created exactly once and never updated or deleted, which is
/// what allows caches to hold them without expiry or invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub domain: String,
    pub code: String,
    pub original_url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(domain: String, code: String, original_url: String) -> Self {
        Self {
            domain,
            code,
            original_url,
        }
    }

    /// Key under which the mapping is cached, e.g. `short:s.example.com:aZ3k9Qp0x`.
    pub fn cache_key(&self) -> String {
        cache_key(&self.domain, &self.code)
    }
}

/// Input data for inserting a new mapping.
///
/// `domain` is expected to be normalized already (trimmed, lower-cased).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub domain: String,
    pub code: String,
    pub original_url: String,
}

impl From<NewLink> for Link {
    fn from(new_link: NewLink) -> Self {
        Link::new(new_link.domain, new_link.code, new_link.original_url)
    }
}

/// Builds the cache key for a `(domain, code)` pair.
pub fn cache_key(domain: &str, code: &str) -> String {
    format!("short:{}:{}", domain, code)
}
