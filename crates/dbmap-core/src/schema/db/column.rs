/// A table column as reported by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Schema of the owning table.
    pub schema: String,

    /// Name of the owning table.
    pub table: String,

    /// The name of the column in the database. Unique within its table.
    pub name: String,

    /// 1-based position of the column within its table. Defines the default field order.
    pub ordinal_position: u32,

    /// The catalog's data type classification, e.g. `ARRAY` or `integer`.
    pub data_type: String,

    /// The native type name, e.g. `character varying` or `integer[]`.
    ///
    /// This is the source of truth for type mapping.
    pub udt_name: String,

    /// The column default expression, if the catalog reports one.
    pub default: Option<String>,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True if the value is assigned by the server from a sequence (serial,
    /// `AUTO_INCREMENT`, SQLite rowid alias).
    pub sequence: bool,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,
}

impl Column {
    /// True when a record may omit this column.
    ///
    /// Sequence-backed columns are optional even when the catalog marks them `NOT NULL`,
    /// because the server assigns the value.
    pub fn is_optional(&self) -> bool {
        self.nullable || self.sequence
    }

    /// True when the column holds an array of its element type.
    pub fn is_array(&self) -> bool {
        self.data_type == "ARRAY" || self.udt_name.ends_with("[]")
    }

    /// `schema.table.column`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.schema, self.table, self.name)
    }
}
