use crate::{Result, TestInfraError};
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use typed_builder::TypedBuilder;

const REDIS_IMAGE: &str = "redis";
const REDIS_TAG: &str = "8.6.0";
const REDIS_PORT: u16 = 6379;

/// A standalone Redis server running in a container.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
}

impl RedisServer {
    /// Starts a Redis container and waits until it accepts connections.
    pub async fn start() -> Result<Self> {
        Ok(Self::launch().await?)
    }

    async fn launch() -> std::result::Result<Self, testcontainers::TestcontainersError> {
        let container = GenericImage::new(REDIS_IMAGE, REDIS_TAG)
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .with_cmd(vec!["redis-server", "--save", "", "--appendonly", "no"])
            .start()
            .await?;
        Ok(Self { container })
    }

    pub async fn host(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();
        Ok(match host.as_str() {
            "localhost" => String::from("127.0.0.1"),
            _ => host,
        })
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(REDIS_PORT).await?)
    }

    /// `redis://host:port` address of this server.
    pub async fn address(&self) -> Result<String> {
        Ok(format!("redis://{}:{}", self.host().await?, self.port().await?))
    }

    /// Opens a raw client connection, for assertions behind the backend's back.
    pub async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        let client = redis::Client::open(self.address().await?)?;
        Ok(client.get_multiplexed_async_connection().await?)
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisShardsConfig {
    /// Number of independent Redis servers.
    #[builder(default = 3)]
    pub shards: usize,
}

impl Default for RedisShardsConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A fixed set of independent Redis servers, one per shard.
pub struct RedisShards {
    servers: Vec<RedisServer>,
}

impl RedisShards {
    pub async fn start(config: RedisShardsConfig) -> Result<Self> {
        if config.shards == 0 {
            return Err(TestInfraError::NoShards);
        }

        let mut servers = Vec::with_capacity(config.shards);
        for index in 0..config.shards {
            let server = RedisServer::launch()
                .await
                .map_err(|source| TestInfraError::ShardStartup { index, source })?;
            servers.push(server);
        }
        Ok(Self { servers })
    }

    /// Addresses in shard order.
    pub async fn addresses(&self) -> Result<Vec<String>> {
        let mut addresses = Vec::with_capacity(self.servers.len());
        for server in &self.servers {
            addresses.push(server.address().await?);
        }
        Ok(addresses)
    }

    pub fn server(&self, index: usize) -> Option<&RedisServer> {
        self.servers.get(index)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
