use crate::backend::ShardBackend;
use crate::error::{Result, StoreError};
use crate::generator::Generator;
use crate::router::Pool;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Expiry applied when `create` is called without a TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Longest accepted TTL: 365 days. Longer requests are rejected as invalid.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Parameters for creating a shortlink.
#[derive(Debug, Clone)]
pub struct ShortenParams {
    /// The target URL. Stored and returned verbatim.
    pub url: String,
    /// Time-to-live. `None` applies the store's default TTL.
    pub ttl: Option<Duration>,
}

impl ShortenParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Object-safe view of a shortlink store, for request handlers.
#[async_trait]
pub trait Shortlinker: Send + Sync + 'static {
    /// Stores `params.url` under a freshly generated short code.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortCode>;

    /// Returns the URL stored under `code`.
    /// Returns `None` if the code was never written or has expired.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreSettings {
    /// Expiry used when a shortlink is created without an explicit TTL.
    #[builder(default = DEFAULT_TTL)]
    pub default_ttl: Duration,
    /// Upper bound for any TTL, explicit or default.
    #[builder(default = MAX_TTL)]
    pub max_ttl: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Shortlink store over a sharded pool of key-value backends.
///
/// Every operation touches exactly one shard: the one [`Pool::route`] assigns
/// to the short code. Backend failures are returned as
/// [`StoreError::BackendUnavailable`] and never retried on another shard,
/// since any other shard would not hold the key.
#[derive(Debug)]
pub struct ShortlinkStore<B, G> {
    pool: Arc<Pool<B>>,
    generator: Arc<G>,
    settings: StoreSettings,
}

impl<B, G> Clone for ShortlinkStore<B, G> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
            generator: Arc::clone(&self.generator),
            settings: self.settings.clone(),
        }
    }
}

impl<B: ShardBackend, G: Generator> ShortlinkStore<B, G> {
    pub fn new(pool: Pool<B>, generator: G, settings: StoreSettings) -> Self {
        Self {
            pool: Arc::new(pool),
            generator: Arc::new(generator),
            settings,
        }
    }

    /// Creates a store with the default TTL.
    pub fn with_defaults(pool: Pool<B>, generator: G) -> Self {
        Self::new(pool, generator, StoreSettings::default())
    }

    pub fn pool(&self) -> &Pool<B> {
        &self.pool
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Stores `url` under a new short code and returns the code.
    ///
    /// The record expires after `ttl`, or after the default TTL when `ttl`
    /// is `None`. Sub-second TTLs are rounded up to whole seconds.
    pub async fn create(&self, url: &str, ttl: Option<Duration>) -> Result<ShortCode> {
        Self::validate_url(url)?;
        let ttl = self.effective_ttl(ttl)?;

        let code: ShortCode = self.generator.generate().into();
        let shard = self.pool.route(&code);
        trace!(code = %code, shard = shard.index, ttl_secs = ttl.as_secs(), "storing shortlink");

        shard
            .backend
            .set_with_expiry(&code, url, ttl)
            .await
            .inspect_err(|e| {
                warn!(code = %code, shard = shard.index, error = %e, "failed to store shortlink");
            })?;

        debug!(code = %code, shard = shard.index, "stored shortlink");
        Ok(code)
    }

    /// Looks up the URL stored under `code`.
    ///
    /// Returns `Ok(None)` when the code was never written or has expired.
    pub async fn resolve(&self, code: &ShortCode) -> Result<Option<String>> {
        let shard = self.pool.route(code);
        trace!(code = %code, shard = shard.index, "resolving shortlink");

        let url = shard.backend.get(code).await.inspect_err(|e| {
            warn!(code = %code, shard = shard.index, error = %e, "failed to read shortlink");
        })?;

        match &url {
            Some(_) => debug!(code = %code, shard = shard.index, "resolved shortlink"),
            None => trace!(code = %code, shard = shard.index, "shortlink not found"),
        }
        Ok(url)
    }

    fn validate_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(StoreError::Validation("url cannot be empty".to_string()));
        }
        // The url is replayed verbatim as a redirect target.
        if url.chars().any(char::is_control) {
            return Err(StoreError::Validation(
                "url cannot contain control characters".to_string(),
            ));
        }
        Ok(())
    }

    fn effective_ttl(&self, ttl: Option<Duration>) -> Result<Duration> {
        let ttl = ttl.unwrap_or(self.settings.default_ttl);
        if ttl.is_zero() {
            return Err(StoreError::Validation(
                "ttl must be at least one second".to_string(),
            ));
        }
        if ttl > self.settings.max_ttl {
            return Err(StoreError::Validation(format!(
                "ttl cannot exceed {} seconds",
                self.settings.max_ttl.as_secs()
            )));
        }
        if ttl.subsec_nanos() == 0 {
            return Ok(ttl);
        }
        Duration::from_secs(ttl.as_secs())
            .checked_add(Duration::from_secs(1))
            .ok_or_else(|| StoreError::Validation("ttl is out of range".to_string()))
    }
}

#[async_trait]
impl<B: ShardBackend, G: Generator> Shortlinker for ShortlinkStore<B, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortCode> {
        self.create(&params.url, params.ttl).await
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>> {
        ShortlinkStore::resolve(self, code).await
    }
}
