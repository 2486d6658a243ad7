use super::{Schema, Table};

/// Everything read from one database, ready for generation.
///
/// The connection stays with the provider that produced this value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    /// Name of the provider that read the catalog, e.g. `postgresql`.
    pub provider: String,

    /// Schemas, in configuration order
    pub schemas: Vec<Schema>,
}

impl Database {
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|schema| schema.name == name)
    }

    /// Looks up a table by schema and name.
    pub fn table(&self, schema: &str, name: &str) -> Option<&Table> {
        self.schema(schema)?.table(name)
    }

    /// All tables, schema by schema.
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.schemas.iter().flat_map(|schema| schema.tables.iter())
    }
}
