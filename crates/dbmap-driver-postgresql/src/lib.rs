mod catalog;

mod pool;
use pool::{pool_error, Connection, Manager, Pool};

use dbmap_core::{
    async_trait,
    config::{DatabaseConfig, GeneratorConfig},
    provider, Database, Error, Provider, Result,
};
use tokio_postgres::Config;

#[derive(Debug)]
pub struct PostgreSQL {
    /// Pooled clients, at most five, none older than an hour.
    pool: Pool,

    /// Schemas and exclusions to read.
    generator: GeneratorConfig,
}

impl PostgreSQL {
    /// Connects using the `database` section of the configuration file.
    pub async fn connect(database: &DatabaseConfig, generator: GeneratorConfig) -> Result<Self> {
        let mut config = Config::new();
        config
            .host(&database.host)
            .user(&database.user)
            .password(&database.password)
            .dbname(&database.database);

        if let Some(port) = database.port() {
            config.port(port);
        }

        log::info!("Connecting to {}", database.display_target());
        Self::connect_with_config(config, generator).await
    }

    /// Connects using a connection string, either `key=value` pairs or a
    /// `postgresql://` URL.
    ///
    /// See [`tokio_postgres::Config`] for the accepted formats.
    pub async fn connect_url(url: &str, generator: GeneratorConfig) -> Result<Self> {
        let config = url
            .parse::<Config>()
            .map_err(|e| Error::invalid_config(format!("invalid PostgreSQL connection URL: {e}")))?;

        Self::connect_with_config(config, generator).await
    }

    /// Builds the pool and pings the server once.
    pub async fn connect_with_config(config: Config, generator: GeneratorConfig) -> Result<Self> {
        let pool = Manager::pool(config)?;

        let postgresql = Self { pool, generator };
        postgresql.ping().await?;
        Ok(postgresql)
    }

    async fn ping(&self) -> Result<()> {
        let client = self.connection().await?;
        client
            .simple_query("SELECT 1")
            .await
            .map_err(Error::connection_failure)?;
        Ok(())
    }

    async fn connection(&self) -> Result<Connection> {
        self.pool.get().await.map_err(pool_error)
    }
}

#[async_trait]
impl Provider for PostgreSQL {
    fn name(&self) -> &'static str {
        catalog::NAME
    }

    async fn read_database(&self) -> Result<Database> {
        provider::read_database(self, &self.generator).await
    }
}
