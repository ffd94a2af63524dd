use async_trait::async_trait;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use shardlink_core::backend::Result;
use shardlink_core::{BackendError, ShardBackend, ShortCode};
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone)]
struct Entry {
    url: String,
    expire_at: Timestamp,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Timestamp::now() >= self.expire_at
    }
}

/// In-memory shard backed by a `DashMap`.
///
/// Expiry is evaluated on read: an expired entry is reported as absent and
/// evicted. Intended for tests and single-process development setups.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    storage: DashMap<String, Entry>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ShardBackend for InMemoryBackend {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = code.as_str();

        let Some(entry) = self.storage.get(key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry);
            self.storage.remove_if(key, |_, e| e.is_expired());
            trace!(code = %code, "evicted expired entry");
            return Ok(None);
        }

        Ok(Some(entry.url.clone()))
    }

    async fn set_with_expiry(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<()> {
        let ttl = SignedDuration::try_from(ttl)
            .map_err(|e| BackendError::Operation(format!("invalid ttl {ttl:?}: {e}")))?;
        let expire_at = Timestamp::now()
            .checked_add(ttl)
            .map_err(|e| BackendError::Operation(format!("invalid ttl {ttl}: {e}")))?;

        self.storage.insert(
            code.as_str().to_owned(),
            Entry {
                url: url.to_owned(),
                expire_at,
            },
        );
        Ok(())
    }
}
