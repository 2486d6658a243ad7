//! Configuration validation.

use super::{Config, ProviderKind};
use crate::{Error, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let database = &config.database;

    // Database validation
    let Some(provider) = database.provider else {
        return Err(Error::invalid_config("database.provider is required"));
    };
    if database.database.is_empty() {
        return Err(Error::invalid_config("database.database is required"));
    }
    if provider != ProviderKind::Sqlite {
        if database.host.is_empty() {
            return Err(Error::invalid_config(format!(
                "database.host is required for {provider}"
            )));
        }
        if database.user.is_empty() {
            return Err(Error::invalid_config(format!(
                "database.user is required for {provider}"
            )));
        }
        if let Some(0) = database.port {
            return Err(Error::invalid_config("database.port must be at least 1"));
        }
    }

    // Proto validation
    if config.proto.path.is_empty() {
        return Err(Error::invalid_config("proto.path is required"));
    }

    // Generator validation
    let generator = &config.generator;
    if generator.schemas.is_empty() {
        return Err(Error::invalid_config(
            "generator.schemas must name at least one schema",
        ));
    }
    if generator.schemas.iter().any(String::is_empty) {
        return Err(Error::invalid_config("generator.schemas contains an empty name"));
    }
    if generator.excluded_tables.iter().any(String::is_empty) {
        return Err(Error::invalid_config(
            "generator.excluded_tables contains an empty name",
        ));
    }
    for excluded in &generator.excluded_columns {
        match excluded.table.split_once('.') {
            Some((schema, table)) if !schema.is_empty() && !table.is_empty() => {}
            _ => {
                return Err(Error::invalid_config(format!(
                    "generator.excluded_columns table must be `schema.table`, got '{}'",
                    excluded.table
                )))
            }
        }
        if excluded.columns.iter().any(String::is_empty) {
            return Err(Error::invalid_config(format!(
                "generator.excluded_columns for '{}' contains an empty column name",
                excluded.table
            )));
        }
    }

    Ok(())
}
