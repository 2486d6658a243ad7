use super::{Column, ForeignRelation, Index};

/// A database table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Schema the table lives in
    pub schema: String,

    /// Name of the table
    pub name: String,

    /// The table's columns, in ordinal order
    pub columns: Vec<Column>,

    pub indices: Vec<Index>,

    /// Foreign keys declared on this table
    pub relations: Vec<ForeignRelation>,
}

impl Table {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            columns: vec![],
            indices: vec![],
            relations: vec![],
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> Option<&Index> {
        self.indices.iter().find(|index| index.is_primary_key())
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// `schema.table`, the key used by column exclusions.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}
