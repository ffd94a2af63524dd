use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use shardlink_backend::RedisSettings;
use shardlink_core::{StoreSettings, MAX_TTL};
use shardlink_generator::RandomGeneratorSettings;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "SHARDLINK_LISTEN_ADDR";
pub const BACKEND_ENV: &str = "SHARDLINK_BACKEND";
pub const SHARDS_ENV: &str = "SHARDLINK_SHARDS";
pub const IN_MEMORY_SHARDS_ENV: &str = "SHARDLINK_IN_MEMORY_SHARDS";
pub const DEFAULT_TTL_ENV: &str = "SHARDLINK_DEFAULT_TTL_SECS";
pub const PUBLIC_HOST_ENV: &str = "SHARDLINK_PUBLIC_HOST";
pub const PUBLIC_PORT_ENV: &str = "SHARDLINK_PUBLIC_PORT";
pub const ID_LENGTH_ENV: &str = "SHARDLINK_ID_LENGTH";
pub const REDIS_TIMEOUT_ENV: &str = "SHARDLINK_REDIS_TIMEOUT_MS";
pub const LOG_FORMAT_ENV: &str = "SHARDLINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_PUBLIC_HOST: &str = "localhost";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    #[value(name = "redis")]
    Redis,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for BackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendArg::Redis => write!(f, "redis"),
            BackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "shardlink-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = BACKEND_ENV, value_enum, default_value_t = BackendArg::Redis)]
    pub backend: BackendArg,

    /// Redis shard addresses in shard order, e.g. `redis://10.0.0.1:6379,redis://10.0.0.2:6379`.
    #[arg(long, env = SHARDS_ENV, value_delimiter = ',')]
    pub shards: Vec<String>,

    /// Number of shards when running with the in-memory backend.
    #[arg(
        long,
        env = IN_MEMORY_SHARDS_ENV,
        default_value_t = 3,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub in_memory_shards: usize,

    #[arg(
        long,
        env = DEFAULT_TTL_ENV,
        default_value_t = 3600,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TTL.as_secs())
    )]
    pub default_ttl_secs: u64,

    /// Host used to build the returned short URL.
    #[arg(long, env = PUBLIC_HOST_ENV, default_value = DEFAULT_PUBLIC_HOST)]
    pub public_host: String,

    /// Port used to build the returned short URL.
    #[arg(long, env = PUBLIC_PORT_ENV, default_value_t = 3000)]
    pub public_port: u16,

    #[arg(
        long,
        env = ID_LENGTH_ENV,
        default_value_t = 8,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=64)
    )]
    pub id_length: usize,

    #[arg(
        long,
        env = REDIS_TIMEOUT_ENV,
        default_value_t = 2000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub redis_timeout_ms: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Base of every returned short URL, e.g. `http://localhost:3000`.
    pub fn public_base_url(&self) -> String {
        format!("http://{}:{}", self.public_host, self.public_port)
    }

    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings::builder()
            .default_ttl(Duration::from_secs(self.default_ttl_secs))
            .build()
    }

    pub fn redis_settings(&self) -> RedisSettings {
        RedisSettings::builder()
            .response_timeout(Duration::from_millis(self.redis_timeout_ms))
            .build()
    }

    pub fn generator_settings(&self) -> RandomGeneratorSettings {
        RandomGeneratorSettings::builder()
            .length(self.id_length)
            .build()
    }
}
