/// An index on a table, with its key parts in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub schema: String,

    pub table: String,

    /// Index name, unique within the table.
    pub name: String,

    pub ty: IndexType,

    /// Indexed column names, in key-part order.
    pub columns: Vec<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IndexType {
    PrimaryKey,
    Unique,
    NonUnique,
}

impl Index {
    pub fn is_primary_key(&self) -> bool {
        self.ty.is_primary_key()
    }

    /// True for primary key and unique indexes.
    pub fn is_unique(&self) -> bool {
        matches!(self.ty, IndexType::PrimaryKey | IndexType::Unique)
    }
}

impl IndexType {
    /// Classifies an index from the catalog's flags. Primary beats unique.
    pub fn from_flags(primary: bool, unique: bool) -> IndexType {
        if primary {
            IndexType::PrimaryKey
        } else if unique {
            IndexType::Unique
        } else {
            IndexType::NonUnique
        }
    }

    pub fn is_primary_key(self) -> bool {
        matches!(self, Self::PrimaryKey)
    }
}
