use shardlink_core::{BackendError, ConfigError};
use thiserror::Error;

/// Errors raised while building a shard pool at start-up.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to connect to shard {index} ({address}): {source}")]
    Connect {
        index: usize,
        address: String,
        #[source]
        source: BackendError,
    },
}
