mod catalog;

use dbmap_core::{
    async_trait,
    config::{DatabaseConfig, GeneratorConfig},
    err, provider, Database, Error, Provider, Result,
};
use rusqlite::Connection;
use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

/// Reads SQLite catalogs. Schema names are database names: `main`, `temp` or the name of
/// an attached database.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<Connection>,

    /// Schemas and exclusions to read.
    generator: GeneratorConfig,
}

impl Sqlite {
    /// Opens the file named by `database.database`, or an in-memory database for
    /// `:memory:`.
    pub fn connect(database: &DatabaseConfig, generator: GeneratorConfig) -> Result<Self> {
        log::info!("Connecting to sqlite://{}", database.database);

        if database.database == ":memory:" {
            Self::in_memory(generator)
        } else {
            Self::open(&database.database, generator)
        }
    }

    /// Open a SQLite database at the specified file path
    pub fn open(path: impl AsRef<Path>, generator: GeneratorConfig) -> Result<Self> {
        let connection = Connection::open(path).map_err(Error::connection_failure)?;
        Self::from_connection(connection, generator)
    }

    /// Create an in-memory SQLite database
    pub fn in_memory(generator: GeneratorConfig) -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::connection_failure)?;
        Self::from_connection(connection, generator)
    }

    /// Wraps an open connection, for example one a caller already populated.
    pub fn from_connection(connection: Connection, generator: GeneratorConfig) -> Result<Self> {
        connection
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(Error::connection_failure)?;

        Ok(Self {
            connection: Mutex::new(connection),
            generator,
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| err!("SQLite connection lock poisoned"))
    }
}

#[async_trait]
impl Provider for Sqlite {
    fn name(&self) -> &'static str {
        catalog::NAME
    }

    async fn read_database(&self) -> Result<Database> {
        provider::read_database(self, &self.generator).await
    }
}
