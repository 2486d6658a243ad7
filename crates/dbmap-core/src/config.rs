//! Configuration file loading.
//!
//! The configuration is a YAML document with four sections:
//!
//! ```yaml
//! database:
//!   provider: postgres
//!   host: localhost
//!   port: 5432
//!   database: app
//!   user: app
//!   password: secret
//! output:
//!   path: ./out
//! proto:
//!   path: proto
//!   java_package: com.example
//!   objc_prefix: EX
//!   version: proto3
//! generator:
//!   schemas: [public]
//!   excluded_tables: [flyway_schema_history]
//!   excluded_columns:
//!     - table: public.user
//!       columns: [password_hash]
//!   embed_relationships: true
//! ```

mod validation;

use crate::{err, Error, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection parameters
    pub database: DatabaseConfig,

    /// Generated source code settings
    pub output: OutputConfig,

    /// Generated schema file settings
    pub proto: ProtoConfig,

    /// What to read from the catalog
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub provider: Option<ProviderKind>,
    pub host: String,

    /// Defaults to the engine's well-known port.
    pub port: Option<u16>,

    /// Database name; for SQLite, a file path or `:memory:`.
    pub database: String,
    pub user: String,
    pub password: String,
}

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(alias = "postgres")]
    Postgresql,

    #[serde(alias = "mariadb")]
    Mysql,

    Sqlite,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output root; `proto.path` is created under it. The `--out-dir` flag overrides it.
    pub path: String,

    /// Accepted so existing configuration files parse; not read by the generator.
    pub suffix: String,

    /// Accepted so existing configuration files parse; not read by the generator.
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtoConfig {
    /// Directory, relative to the output root, receiving one sub-directory per schema.
    pub path: String,

    /// Prefix of the `java_package` option; the schema name is appended.
    pub java_package: String,

    pub objc_prefix: String,

    pub version: ProtoVersion,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtoVersion {
    Proto2,

    #[default]
    Proto3,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Schemas to read, in order.
    pub schemas: Vec<String>,

    /// Table names skipped in every schema.
    pub excluded_tables: Vec<String>,

    pub excluded_columns: Vec<ExcludedColumns>,

    /// When set, foreign keys become fields referencing the foreign table's message.
    pub embed_relationships: bool,
}

/// Columns left out of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExcludedColumns {
    /// Table, as `schema.table`.
    pub table: String,

    pub columns: Vec<String>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_config(e.to_string())
                .context(err!("reading configuration {}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(yaml).map_err(|e| Error::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl DatabaseConfig {
    /// The configured port, or the engine default.
    pub fn port(&self) -> Option<u16> {
        self.port.or(match self.provider? {
            ProviderKind::Postgresql => Some(5432),
            ProviderKind::Mysql => Some(3306),
            ProviderKind::Sqlite => None,
        })
    }

    /// Describes the connection target without the password.
    pub fn display_target(&self) -> String {
        match (self.provider, self.port()) {
            (Some(ProviderKind::Sqlite), _) | (None, _) => self.database.clone(),
            (Some(provider), Some(port)) => format!(
                "{}://{}@{}:{}/{}",
                provider, self.user, self.host, port, self.database
            ),
            (Some(provider), None) => {
                format!("{}://{}@{}/{}", provider, self.user, self.host, self.database)
            }
        }
    }
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Postgresql => "postgresql",
            ProviderKind::Mysql => "mysql",
            ProviderKind::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ProtoConfig {
    fn default() -> Self {
        Self {
            path: "proto".to_string(),
            java_package: String::new(),
            objc_prefix: String::new(),
            version: ProtoVersion::default(),
        }
    }
}

impl ProtoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the proto output directory
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn java_package(mut self, java_package: impl Into<String>) -> Self {
        self.java_package = java_package.into();
        self
    }

    pub fn objc_prefix(mut self, objc_prefix: impl Into<String>) -> Self {
        self.objc_prefix = objc_prefix.into();
        self
    }

    pub fn version(mut self, version: ProtoVersion) -> Self {
        self.version = version;
        self
    }
}

impl ProtoVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            ProtoVersion::Proto2 => "proto2",
            ProtoVersion::Proto3 => "proto3",
        }
    }

    /// proto2 requires every singular field to carry a label.
    pub fn requires_label(self) -> bool {
        matches!(self, ProtoVersion::Proto2)
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema to read
    pub fn schema(mut self, name: impl Into<String>) -> Self {
        self.schemas.push(name.into());
        self
    }

    /// Skip a table in every schema
    pub fn exclude_table(mut self, name: impl Into<String>) -> Self {
        self.excluded_tables.push(name.into());
        self
    }

    /// Skip columns of the table `schema.table`
    pub fn exclude_columns<I, S>(mut self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_columns.push(ExcludedColumns {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn embed_relationships(mut self, embed: bool) -> Self {
        self.embed_relationships = embed;
        self
    }

    pub fn is_table_excluded(&self, table: &str) -> bool {
        self.excluded_tables.iter().any(|excluded| excluded == table)
    }

    pub fn is_column_excluded(&self, schema: &str, table: &str, column: &str) -> bool {
        self.excluded_columns.iter().any(|excluded| {
            excluded
                .table
                .strip_prefix(schema)
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|rest| rest == table)
                && excluded.columns.iter().any(|c| c == column)
        })
    }
}
