/// A foreign key constraint from the owning table to exactly one foreign table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignRelation {
    /// Name of the constraint in the database.
    pub name: String,

    pub foreign_schema: String,

    pub foreign_table: String,

    /// Key parts, in composite key order.
    pub columns: Vec<ForeignColumn>,

    pub ty: RelationType,
}

/// One key part of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignColumn {
    /// Referenced column in the foreign table.
    pub foreign_column: String,

    /// Referencing column in the owning table.
    pub local_column: String,

    /// 1-based position of this key part within the constraint.
    pub ordinal_position: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// The owning row references zero or one foreign row; a foreign row is referenced by any
    /// number of owning rows.
    ZeroOneOrMore,

    /// Recognized but never emitted: embedding both sides would make the generated message
    /// graph cyclic.
    ManyToMany,
}

impl ForeignRelation {
    /// The key part standing in for the whole composite key: the one with the lowest
    /// ordinal position.
    pub fn representative(&self) -> Option<&ForeignColumn> {
        self.columns.iter().min_by_key(|column| column.ordinal_position)
    }

    /// Local column names, in key order.
    pub fn local_columns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.iter().map(|column| column.local_column.as_str())
    }

    pub fn has_local_column(&self, name: &str) -> bool {
        self.local_columns().any(|local| local == name)
    }

    /// `foreign_schema.foreign_table`
    pub fn foreign_qualified_name(&self) -> String {
        format!("{}.{}", self.foreign_schema, self.foreign_table)
    }
}

impl RelationType {
    pub fn is_many_to_many(self) -> bool {
        matches!(self, Self::ManyToMany)
    }
}
