use crate::{Flavor, Setup};

use dbmap_core::{config::GeneratorConfig, Error, Provider, Result};
use dbmap_driver_sqlite::Sqlite;
use std::path::PathBuf;
use tempfile::TempDir;

/// Each test gets a database file in its own temporary directory; the directory is
/// removed when the setup drops.
pub struct SetupSqlite {
    dir: TempDir,
}

impl SetupSqlite {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temporary directory"),
        }
    }

    fn path(&self) -> PathBuf {
        self.dir.path().join("store.db")
    }
}

impl Default for SetupSqlite {
    fn default() -> Self {
        Self::new()
    }
}

#[dbmap_core::async_trait]
impl Setup for SetupSqlite {
    fn flavor(&self) -> Flavor {
        Flavor::Sqlite
    }

    fn schema(&self) -> String {
        "main".to_string()
    }

    async fn execute(&self, statements: &[String]) -> Result<()> {
        let connection =
            rusqlite::Connection::open(self.path()).map_err(Error::connection_failure)?;

        for statement in statements {
            connection
                .execute_batch(statement)
                .map_err(Error::query_failure)?;
        }

        Ok(())
    }

    async fn connect(&self, generator: GeneratorConfig) -> Result<Box<dyn Provider>> {
        Ok(Box::new(Sqlite::open(self.path(), generator)?))
    }

    async fn cleanup(&self) -> Result<()> {
        Ok(())
    }
}
