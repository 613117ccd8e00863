//! Short code allocation and lookup service.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{LinkError, StoreError};
use crate::domain::repositories::LinkStore;
use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};
use crate::utils::code_generator::{CodeGenerator, normalize_domain};

/// Default number of allocation attempts before giving up on collisions.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Default bound on a single cache operation.
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(100);

/// Allocates short codes and resolves them back to their original URLs.
///
/// The store is the only source of truth. The cache is consulted first on
/// reads and filled after writes and store reads, but every cache failure or
/// timeout is logged and absorbed here; it never changes the outcome of an
/// operation.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    cache: Arc<dyn CacheService>,
    generator: CodeGenerator,
    max_attempts: usize,
    cache_timeout: Duration,
}

impl LinkService {
    /// Creates a new link service with the default attempt bound and cache timeout.
    pub fn new(
        store: Arc<dyn LinkStore>,
        cache: Arc<dyn CacheService>,
        generator: CodeGenerator,
    ) -> Self {
        Self {
            store,
            cache,
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }

    /// Sets the number of allocation attempts (at least one).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the bound applied to each cache get and set.
    pub fn with_cache_timeout(mut self, cache_timeout: Duration) -> Self {
        self.cache_timeout = cache_timeout;
        self
    }

    pub fn store(&self) -> &Arc<dyn LinkStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    /// Allocates a fresh code for `original_url` under `domain`.
    ///
    /// The domain is trimmed and lower-cased; the URL is stored unchanged.
    /// Every call creates a new mapping, even for a URL already shortened.
    ///
    /// # Collision Handling
    ///
    /// Each attempt generates a candidate and inserts it under the store's
    /// uniqueness constraint. A collision discards the candidate and retries;
    /// any other store failure aborts immediately.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidInput`] if the domain or URL is empty
    /// - [`LinkError::ExhaustedRetries`] if every attempt collided
    /// - [`LinkError::StoreUnavailable`] on a non-collision store failure
    /// - [`LinkError::EntropyUnavailable`] if the random source fails under the strict policy
    pub async fn allocate(&self, domain: &str, original_url: &str) -> Result<Link, LinkError> {
        let domain = normalize_domain(domain)
            .ok_or_else(|| LinkError::InvalidInput("'domain' is required".to_string()))?;

        if original_url.is_empty() {
            return Err(LinkError::InvalidInput("'url' is required".to_string()));
        }

        for attempt in 1..=self.max_attempts {
            let code = self
                .generator
                .generate()
                .map_err(|e| LinkError::EntropyUnavailable(e.to_string()))?;

            let new_link = NewLink {
                domain: domain.clone(),
                code,
                original_url: original_url.to_string(),
            };

            match self.store.insert_unique(&new_link).await {
                Ok(()) => {
                    info!(domain = %new_link.domain, code = %new_link.code, attempt, "Allocated short code");
                    let link = Link::from(new_link);
                    self.populate_cache(&link.domain, &link.code, &link.original_url);
                    return Ok(link);
                }
                Err(StoreError::Collision) => {
                    debug!(domain = %domain, code = %new_link.code, attempt, "Code collision, retrying");
                }
                Err(StoreError::Unavailable(msg)) => {
                    error!(domain = %domain, error = %msg, "Store insert failed");
                    return Err(LinkError::StoreUnavailable(msg));
                }
            }
        }

        error!(
            domain = %domain,
            attempts = self.max_attempts,
            "Exhausted allocation attempts; check entropy source and domain size"
        );
        Err(LinkError::ExhaustedRetries {
            attempts: self.max_attempts,
        })
    }

    /// Resolves `code` under `domain` to its original URL.
    ///
    /// # Request Flow
    ///
    /// 1. Reject codes that are not of the generated shape (no store access)
    /// 2. Check the cache, bounded by the cache timeout
    /// 3. On miss, error or timeout, query the store
    /// 4. On a store hit, refill the cache in the background
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidInput`] if the domain is empty
    /// - [`LinkError::NotFound`] if the code is malformed or has no mapping
    /// - [`LinkError::StoreUnavailable`] on a store failure
    pub async fn resolve(&self, domain: &str, code: &str) -> Result<String, LinkError> {
        let domain = normalize_domain(domain)
            .ok_or_else(|| LinkError::InvalidInput("'domain' is required".to_string()))?;

        if !self.generator.accepts(code) {
            debug!(code = %code, "Rejected malformed code");
            return Err(LinkError::NotFound);
        }

        if let Some(url) = self.cached_url(&domain, code).await {
            return Ok(url);
        }

        match self.store.find(&domain, code).await {
            Ok(Some(url)) => {
                self.populate_cache(&domain, code, &url);
                Ok(url)
            }
            Ok(None) => Err(LinkError::NotFound),
            Err(e) => {
                error!(domain = %domain, code = %code, error = %e, "Store lookup failed");
                Err(e.into())
            }
        }
    }

    /// Constructs the full short URL from a domain and code.
    ///
    /// Uses `http` for local development hosts (`localhost`, `127.0.0.1`)
    /// and `https` everywhere else.
    pub fn short_url(domain: &str, code: &str) -> String {
        let scheme = if domain.contains("localhost") || domain.contains("127.0.0.1") {
            "http"
        } else {
            "https"
        };
        format!("{}://{}/{}", scheme, domain, code)
    }

    /// Cache lookup that treats errors and timeouts as misses.
    async fn cached_url(&self, domain: &str, code: &str) -> Option<String> {
        if !self.cache.is_enabled() {
            return None;
        }

        match bounded(self.cache_timeout, self.cache.get_url(domain, code)).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(domain = %domain, code = %code, error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    /// Writes a mapping to the cache in the background.
    ///
    /// The outcome is logged and dropped; it can never affect the caller.
    fn populate_cache(&self, domain: &str, code: &str, original_url: &str) {
        if !self.cache.is_enabled() {
            return;
        }

        let cache = self.cache.clone();
        let cache_timeout = self.cache_timeout;
        let domain = domain.to_string();
        let code = code.to_string();
        let original_url = original_url.to_string();

        tokio::spawn(async move {
            if let Err(e) = bounded(cache_timeout, cache.set_url(&domain, &code, &original_url)).await
            {
                warn!(domain = %domain, code = %code, error = %e, "Failed to cache URL");
            }
        });
    }
}

/// Runs a cache operation, turning an elapsed deadline into [`CacheError::Timeout`].
async fn bounded<T>(limit: Duration, op: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
    tokio::time::timeout(limit, op)
        .await
        .unwrap_or(Err(CacheError::Timeout))
}
