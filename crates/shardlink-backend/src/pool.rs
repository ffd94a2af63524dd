use crate::error::PoolError;
use crate::memory::InMemoryBackend;
use crate::redis::{RedisBackend, RedisSettings};
use shardlink_core::{ConfigError, Pool};
use tracing::info;

/// Connects one [`RedisBackend`] per address, preserving order.
///
/// The position of an address in `addresses` is its shard index. Reordering
/// the list, or changing its length, changes which shard owns existing keys.
pub async fn connect_redis_pool<S: AsRef<str>>(
    addresses: &[S],
    settings: RedisSettings,
) -> Result<Pool<RedisBackend>, PoolError> {
    if addresses.is_empty() {
        return Err(ConfigError::EmptyPool.into());
    }

    // Reject malformed addresses before opening any connection.
    let clients = addresses
        .iter()
        .map(|address| RedisBackend::client(address.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut shards = Vec::with_capacity(clients.len());
    for (index, (address, client)) in addresses.iter().zip(&clients).enumerate() {
        let address = address.as_ref();
        let backend = RedisBackend::connect(client, settings.clone())
            .await
            .map_err(|source| PoolError::Connect {
                index,
                address: address.to_string(),
                source,
            })?;
        info!(shard = index, address = %address, "shard connected");
        shards.push(backend);
    }

    Ok(Pool::new(shards)?)
}

/// Builds a pool of `shards` independent in-memory backends.
pub fn in_memory_pool(shards: usize) -> Result<Pool<InMemoryBackend>, ConfigError> {
    Pool::new((0..shards).map(|_| InMemoryBackend::new()).collect())
}
