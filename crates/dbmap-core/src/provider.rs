//! Reading a [`Database`] out of a live catalog.
//!
//! Each supported engine ships a type implementing both [`Catalog`] (the four engine
//! specific queries) and [`Provider`] (the public entry point). The reading loop itself is
//! shared: [`read_database`] walks the configured schemas in order and fails fast.

use crate::{
    config::GeneratorConfig,
    err,
    schema::{
        catalog::{self, ForeignKeyRow, IndexRow},
        db::{Column, Database, Schema, Table},
    },
    async_trait, Error, Result,
};

use std::{fmt::Debug, time::Duration};

/// Maximum number of open connections a provider keeps.
pub const MAX_CONNECTIONS: usize = 5;

/// Connections older than this are closed instead of reused.
pub const MAX_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Reads the configured schemas of one database engine.
#[async_trait]
pub trait Provider: Debug + Send + Sync + 'static {
    /// Short engine name, used as the prefix of progress lines.
    fn name(&self) -> &'static str;

    /// Reads every configured schema, in configuration order.
    async fn read_database(&self) -> Result<Database>;
}

/// The catalog queries a provider has to answer.
///
/// Every method returns rows in the order documented on it; the grouping step relies on
/// that order and does not sort.
#[async_trait]
pub trait Catalog: Send + Sync {
    fn name(&self) -> &'static str;

    /// Base tables of `schema`, ordered by name, without the `excluded` ones.
    async fn tables(&self, schema: &str, excluded: &[String]) -> Result<Vec<String>>;

    /// Columns of a table, ordered by ordinal position.
    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<Column>>;

    /// Index key parts of a table, ordered by index name, then key part.
    async fn index_rows(&self, schema: &str, table: &str) -> Result<Vec<IndexRow>>;

    /// Foreign key column pairs of a table, ordered by foreign schema, foreign table,
    /// constraint name, then key part.
    async fn foreign_key_rows(&self, schema: &str, table: &str) -> Result<Vec<ForeignKeyRow>>;
}

/// Reads all schemas named in `config` through `catalog`.
///
/// A failure in any table aborts the containing schema and is returned with the schema and
/// table as context.
pub async fn read_database(catalog: &dyn Catalog, config: &GeneratorConfig) -> Result<Database> {
    if config.schemas.is_empty() {
        return Err(Error::invalid_arguments("no schema names configured"));
    }

    let mut schemas = Vec::with_capacity(config.schemas.len());

    for name in &config.schemas {
        let schema = read_schema(catalog, config, name)
            .await
            .map_err(|e| e.context(err!("[{}] failed reading schema {}", catalog.name(), name)))?;
        schemas.push(schema);
    }

    Ok(Database {
        provider: catalog.name().to_string(),
        schemas,
    })
}

/// Reads one schema: its non-excluded base tables and everything hanging off them.
pub async fn read_schema(
    catalog: &dyn Catalog,
    config: &GeneratorConfig,
    name: &str,
) -> Result<Schema> {
    if name.is_empty() {
        return Err(Error::invalid_arguments("schema name is empty"));
    }

    log::info!("[{}] {}", catalog.name(), name);

    let mut schema = Schema::new(name);

    for table_name in catalog.tables(name, &config.excluded_tables).await? {
        if config.is_table_excluded(&table_name) {
            log::info!("[{}] {}.{} (excluding)", catalog.name(), name, table_name);
            continue;
        }

        log::info!("[{}] {}.{}", catalog.name(), name, table_name);
        schema
            .tables
            .push(read_table(catalog, config, name, &table_name).await?);
    }

    Ok(schema)
}

/// Reads the columns, indexes and foreign relations of one table.
pub async fn read_table(
    catalog: &dyn Catalog,
    config: &GeneratorConfig,
    schema: &str,
    name: &str,
) -> Result<Table> {
    if schema.is_empty() || name.is_empty() {
        return Err(Error::invalid_arguments(format!(
            "table reference `{schema}.{name}` is incomplete"
        )));
    }

    let mut table = Table::new(schema, name);

    let columns = catalog
        .columns(schema, name)
        .await
        .map_err(|e| e.context(err!("reading columns for table {schema}.{name}")))?;

    for column in columns {
        if config.is_column_excluded(schema, name, &column.name) {
            log::info!("   excluding column: {}", column.name);
            continue;
        }
        table.columns.push(column);
    }

    let index_rows = catalog
        .index_rows(schema, name)
        .await
        .map_err(|e| e.context(err!("reading indexes for table {schema}.{name}")))?;
    table.indices = catalog::indexes(schema, name, index_rows)
        .map_err(|e| e.context(err!("grouping indexes for table {schema}.{name}")))?;

    let foreign_key_rows = catalog
        .foreign_key_rows(schema, name)
        .await
        .map_err(|e| e.context(err!("reading foreign relationships for table {schema}.{name}")))?;
    table.relations = catalog::relations(foreign_key_rows)
        .map_err(|e| e.context(err!("grouping foreign relationships for table {schema}.{name}")))?;

    Ok(table)
}
