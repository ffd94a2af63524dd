use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("redis shard {index} failed to start: {source}")]
    ShardStartup {
        index: usize,
        #[source]
        source: testcontainers::TestcontainersError,
    },

    #[error("at least one redis shard is required")]
    NoShards,
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
