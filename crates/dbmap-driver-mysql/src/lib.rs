mod catalog;

use dbmap_core::{
    async_trait,
    config::{DatabaseConfig, GeneratorConfig},
    provider::{self, MAX_CONNECTIONS, MAX_CONNECTION_LIFETIME},
    Database, Error, Provider, Result,
};
use mysql_async::{prelude::Queryable, Conn, Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts};

/// Reads MySQL and MariaDB catalogs through `information_schema`.
#[derive(Debug)]
pub struct MySQL {
    pool: Pool,

    /// Schemas and exclusions to read.
    generator: GeneratorConfig,
}

impl MySQL {
    /// Connects using the `database` section of the configuration file.
    pub async fn connect(database: &DatabaseConfig, generator: GeneratorConfig) -> Result<Self> {
        let mut opts = OptsBuilder::default()
            .ip_or_hostname(database.host.clone())
            .user(Some(database.user.clone()))
            .pass(Some(database.password.clone()))
            .db_name(Some(database.database.clone()));

        if let Some(port) = database.port() {
            opts = opts.tcp_port(port);
        }

        log::info!("Connecting to {}", database.display_target());
        Self::connect_with_opts(opts, generator).await
    }

    /// Connects using a `mysql://` URL.
    pub async fn connect_url(url: &str, generator: GeneratorConfig) -> Result<Self> {
        let opts = Opts::from_url(url)
            .map_err(|e| Error::invalid_config(format!("invalid MySQL connection URL: {e}")))?;

        Self::connect_with_opts(OptsBuilder::from_opts(opts), generator).await
    }

    /// Builds the pool and pings the server once.
    pub async fn connect_with_opts(opts: OptsBuilder, generator: GeneratorConfig) -> Result<Self> {
        let constraints = PoolConstraints::new(0, MAX_CONNECTIONS)
            .ok_or_else(|| Error::invalid_config("invalid connection pool bounds"))?;

        let pool_opts = PoolOpts::default()
            .with_constraints(constraints)
            .with_abs_conn_ttl(Some(MAX_CONNECTION_LIFETIME));

        let mysql = Self {
            pool: Pool::new(opts.pool_opts(pool_opts)),
            generator,
        };

        let mut conn = mysql.connection().await?;
        conn.query_drop("SELECT 1")
            .await
            .map_err(Error::connection_failure)?;

        Ok(mysql)
    }

    async fn connection(&self) -> Result<Conn> {
        self.pool.get_conn().await.map_err(Error::connection_failure)
    }
}

#[async_trait]
impl Provider for MySQL {
    fn name(&self) -> &'static str {
        catalog::NAME
    }

    async fn read_database(&self) -> Result<Database> {
        provider::read_database(self, &self.generator).await
    }
}
