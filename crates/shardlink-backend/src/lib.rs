//! Shard backends for the shardlink store.

pub mod error;
pub mod memory;
pub mod pool;
pub mod redis;

pub use error::PoolError;
pub use memory::InMemoryBackend;
pub use pool::{connect_redis_pool, in_memory_pool};
pub use redis::{RedisBackend, RedisSettings};
