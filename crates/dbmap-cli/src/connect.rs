use anyhow::Result;
use dbmap_core::{
    config::{DatabaseConfig, GeneratorConfig, ProviderKind},
    Config, Provider,
};

/// Opens the provider named by `database.provider`.
pub(crate) async fn connect(config: &Config) -> Result<Box<dyn Provider>> {
    let database = &config.database;
    let generator = config.generator.clone();

    match database.provider {
        Some(ProviderKind::Mysql) => connect_mysql(database, generator).await,
        Some(ProviderKind::Postgresql) => connect_postgresql(database, generator).await,
        Some(ProviderKind::Sqlite) => connect_sqlite(database, generator),
        None => anyhow::bail!("database.provider is required"),
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "mysql")] {
        async fn connect_mysql(
            database: &DatabaseConfig,
            generator: GeneratorConfig,
        ) -> Result<Box<dyn Provider>> {
            let provider = dbmap_driver_mysql::MySQL::connect(database, generator).await?;
            Ok(Box::new(provider))
        }
    } else {
        async fn connect_mysql(
            _database: &DatabaseConfig,
            _generator: GeneratorConfig,
        ) -> Result<Box<dyn Provider>> {
            anyhow::bail!("`mysql` feature not enabled")
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "postgresql")] {
        async fn connect_postgresql(
            database: &DatabaseConfig,
            generator: GeneratorConfig,
        ) -> Result<Box<dyn Provider>> {
            let provider =
                dbmap_driver_postgresql::PostgreSQL::connect(database, generator).await?;
            Ok(Box::new(provider))
        }
    } else {
        async fn connect_postgresql(
            _database: &DatabaseConfig,
            _generator: GeneratorConfig,
        ) -> Result<Box<dyn Provider>> {
            anyhow::bail!("`postgresql` feature not enabled")
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "sqlite")] {
        fn connect_sqlite(
            database: &DatabaseConfig,
            generator: GeneratorConfig,
        ) -> Result<Box<dyn Provider>> {
            let provider = dbmap_driver_sqlite::Sqlite::connect(database, generator)?;
            Ok(Box::new(provider))
        }
    } else {
        fn connect_sqlite(
            _database: &DatabaseConfig,
            _generator: GeneratorConfig,
        ) -> Result<Box<dyn Provider>> {
            anyhow::bail!("`sqlite` feature not enabled")
        }
    }
}
