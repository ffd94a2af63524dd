use thiserror::Error;

/// Result type for shortlink store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures reported by a single shard backend.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("shard backend unavailable: {0}")]
    Unavailable(String),
    #[error("shard operation timed out: {0}")]
    Timeout(String),
    #[error("shard operation failed: {0}")]
    Operation(String),
}

/// Invalid shard pool configuration. Fatal at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("shard pool is empty")]
    EmptyPool,
    #[error("invalid shard address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] BackendError),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}
