use crate::{isolation::TestIsolation, Flavor, Setup};

use dbmap_core::{config::GeneratorConfig, Error, Provider, Result};
use dbmap_driver_mysql::MySQL;
use mysql_async::{prelude::Queryable, Conn, Opts};

/// MySQL has no schemas inside a database, so each test creates a database of its own.
pub struct SetupMySQL {
    isolation: TestIsolation,
}

impl SetupMySQL {
    pub fn new() -> Self {
        Self {
            isolation: TestIsolation::new(),
        }
    }
}

impl Default for SetupMySQL {
    fn default() -> Self {
        Self::new()
    }
}

fn url() -> String {
    std::env::var("DBMAP_TEST_MYSQL_URL")
        .unwrap_or_else(|_| "mysql://root@localhost:3306/dbmap_test".to_string())
}

async fn conn() -> Result<Conn> {
    let opts = Opts::from_url(&url()).map_err(|e| Error::invalid_config(e.to_string()))?;
    Conn::new(opts).await.map_err(Error::connection_failure)
}

#[dbmap_core::async_trait]
impl Setup for SetupMySQL {
    fn flavor(&self) -> Flavor {
        Flavor::MySQL
    }

    fn schema(&self) -> String {
        self.isolation.schema()
    }

    async fn execute(&self, statements: &[String]) -> Result<()> {
        let mut conn = conn().await?;
        let schema = self.schema();

        conn.query_drop(format!("CREATE DATABASE IF NOT EXISTS {schema}"))
            .await
            .map_err(Error::query_failure)?;
        conn.query_drop(format!("USE {schema}"))
            .await
            .map_err(Error::query_failure)?;

        for statement in statements {
            conn.query_drop(statement)
                .await
                .map_err(Error::query_failure)?;
        }

        conn.disconnect().await.map_err(Error::connection_failure)
    }

    async fn connect(&self, generator: GeneratorConfig) -> Result<Box<dyn Provider>> {
        Ok(Box::new(MySQL::connect_url(&url(), generator).await?))
    }

    async fn cleanup(&self) -> Result<()> {
        let mut conn = conn().await?;

        conn.query_drop(format!("DROP DATABASE IF EXISTS {}", self.schema()))
            .await
            .map_err(Error::query_failure)?;

        conn.disconnect().await.map_err(Error::connection_failure)
    }
}
