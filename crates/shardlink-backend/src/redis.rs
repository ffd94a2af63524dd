use async_trait::async_trait;
use redis::AsyncCommands;
use shardlink_core::backend::Result;
use shardlink_core::{BackendError, ConfigError, ShardBackend, ShortCode};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_KEY_PREFIX: &str = "sl:url:";
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Connection settings shared by every Redis shard.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisSettings {
    /// Prefix prepended to every short code to form the Redis key.
    #[builder(default = DEFAULT_KEY_PREFIX.to_string(), setter(into))]
    pub key_prefix: String,
    /// Upper bound for connecting and for every command round trip.
    #[builder(default = DEFAULT_RESPONSE_TIMEOUT)]
    pub response_timeout: Duration,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A shard backed by a single Redis server.
///
/// Values are stored as plain strings with `SET key url EX ttl`, so Redis
/// owns expiry. Each command is bounded by the configured response timeout;
/// a shard that stops answering yields [`BackendError::Timeout`].
#[derive(Debug, Clone)]
pub struct RedisBackend {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
    response_timeout: Duration,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> BackendError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        BackendError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        BackendError::Unavailable(message)
    } else {
        BackendError::Operation(message)
    }
}

impl RedisBackend {
    /// Wraps an established connection.
    pub fn new(conn: redis::aio::MultiplexedConnection, settings: RedisSettings) -> Self {
        Self {
            conn,
            key_prefix: settings.key_prefix,
            response_timeout: settings.response_timeout,
        }
    }

    /// Parses a shard address such as `redis://127.0.0.1:6379`.
    pub fn client(address: &str) -> std::result::Result<redis::Client, ConfigError> {
        redis::Client::open(address).map_err(|e| ConfigError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
    }

    /// Opens a multiplexed connection through `client`.
    ///
    /// Gives up with [`BackendError::Timeout`] once the response timeout
    /// elapses.
    pub async fn connect(client: &redis::Client, settings: RedisSettings) -> Result<Self> {
        let conn = bounded(
            settings.response_timeout,
            "failed to connect to Redis",
            client.get_multiplexed_async_connection(),
        )
        .await?;

        debug!("connected to Redis shard");
        Ok(Self::new(conn, settings))
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    fn key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }
}

/// Runs a Redis command, failing with [`BackendError::Timeout`] after `limit`.
async fn bounded<T>(
    limit: Duration,
    operation: &str,
    fut: impl Future<Output = redis::RedisResult<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(map_redis_error(operation, e)),
        Err(_) => Err(BackendError::Timeout(format!(
            "{operation}: no reply within {}ms",
            limit.as_millis()
        ))),
    }
}

#[async_trait]
impl ShardBackend for RedisBackend {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = self.key(code);
        trace!(code = %code, "GET from Redis shard");

        let mut conn = self.conn.clone();
        bounded(
            self.response_timeout,
            "failed to fetch value from Redis",
            conn.get::<_, Option<String>>(&key),
        )
        .await
        .inspect_err(|e| warn!(code = %code, error = %e, "Redis error on get"))
    }

    async fn set_with_expiry(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<()> {
        let key = self.key(code);
        let seconds = ttl.as_secs();
        if seconds == 0 {
            return Err(BackendError::Operation(format!(
                "Redis expiry must be at least one second, got {}ms",
                ttl.as_millis()
            )));
        }
        trace!(code = %code, ttl_secs = seconds, "SET EX on Redis shard");

        let mut conn = self.conn.clone();
        bounded(
            self.response_timeout,
            "failed to write value to Redis",
            conn.set_ex::<_, _, ()>(&key, url, seconds),
        )
        .await
        .inspect_err(|e| warn!(code = %code, error = %e, "Redis error on set"))
    }
}
