use crate::error::BackendError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, BackendError>;

/// One shard of the key-value pool.
///
/// A backend is an opaque GET / SET-with-expiry service. It owns expiry: once
/// the TTL given to [`set_with_expiry`](ShardBackend::set_with_expiry) has
/// elapsed, [`get`](ShardBackend::get) must report the key as absent.
/// Implementations must be safe under concurrent access to different keys.
#[async_trait]
pub trait ShardBackend: Send + Sync + 'static {
    /// Reads the URL stored under `code`.
    ///
    /// Returns `Ok(None)` if the key was never written or has expired.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Writes `url` under `code`, expiring after `ttl`.
    ///
    /// An existing value for the same key is overwritten.
    async fn set_with_expiry(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<()>;
}

#[async_trait]
impl<B: ShardBackend + ?Sized> ShardBackend for std::sync::Arc<B> {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        (**self).get(code).await
    }

    async fn set_with_expiry(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<()> {
        (**self).set_with_expiry(code, url, ttl).await
    }
}
