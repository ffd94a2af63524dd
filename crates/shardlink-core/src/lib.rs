//! Core types for the shardlink URL shortener.
//!
//! Shortlinks are spread over a fixed pool of key-value shards. The
//! [`router`] decides which shard owns an identifier, and the
//! [`ShortlinkStore`] builds the create / resolve protocol on top of it.

pub mod backend;
pub mod error;
pub mod generator;
pub mod router;
pub mod shortcode;
pub mod store;

pub use backend::ShardBackend;
pub use error::{BackendError, ConfigError, StoreError};
pub use generator::Generator;
pub use router::{Pool, Shard};
pub use shortcode::ShortCode;
pub use store::{
    ShortenParams, Shortlinker, ShortlinkStore, StoreSettings, DEFAULT_TTL, MAX_TTL,
};
