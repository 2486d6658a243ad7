use crate::{isolation::TestIsolation, Flavor, Setup};

use dbmap_core::{config::GeneratorConfig, Error, Provider, Result};
use dbmap_driver_postgresql::PostgreSQL;
use tokio_postgres::{Client, NoTls};

pub struct SetupPostgreSQL {
    isolation: TestIsolation,
}

impl SetupPostgreSQL {
    pub fn new() -> Self {
        Self {
            isolation: TestIsolation::new(),
        }
    }
}

impl Default for SetupPostgreSQL {
    fn default() -> Self {
        Self::new()
    }
}

fn url() -> String {
    std::env::var("DBMAP_TEST_POSTGRES_URL")
        .unwrap_or_else(|_| "postgresql://localhost:5432/dbmap_test".to_string())
}

async fn client() -> Result<Client> {
    let (client, connection) = tokio_postgres::connect(&url(), NoTls)
        .await
        .map_err(Error::connection_failure)?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("PostgreSQL connection error during setup: {e}");
        }
    });

    Ok(client)
}

#[dbmap_core::async_trait]
impl Setup for SetupPostgreSQL {
    fn flavor(&self) -> Flavor {
        Flavor::PostgreSQL
    }

    fn schema(&self) -> String {
        self.isolation.schema()
    }

    async fn execute(&self, statements: &[String]) -> Result<()> {
        let client = client().await?;
        let schema = self.schema();

        client
            .batch_execute(&format!(
                "CREATE SCHEMA IF NOT EXISTS {schema}; SET search_path TO {schema};"
            ))
            .await
            .map_err(Error::query_failure)?;

        for statement in statements {
            client
                .batch_execute(statement)
                .await
                .map_err(Error::query_failure)?;
        }

        Ok(())
    }

    async fn connect(&self, generator: GeneratorConfig) -> Result<Box<dyn Provider>> {
        Ok(Box::new(PostgreSQL::connect_url(&url(), generator).await?))
    }

    async fn cleanup(&self) -> Result<()> {
        client()
            .await?
            .batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema()))
            .await
            .map_err(Error::query_failure)
    }
}
