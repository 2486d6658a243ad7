//! Turns flat catalog result rows into grouped schema entities.
//!
//! Catalog queries return one row per index key part and one row per foreign key column
//! pair. Rows belonging to the same index or constraint are contiguous, which the queries
//! guarantee through their `ORDER BY`. The functions here fold those row streams into
//! [`Index`] and [`ForeignRelation`] values without re-sorting them.

mod group;
pub use group::group_rows;

use super::db::{ForeignColumn, ForeignRelation, Index, IndexType, RelationType};
use crate::Result;

/// One key part of one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub index_name: String,
    pub column_name: String,
    pub unique: bool,
    pub primary: bool,
}

/// One column pair of one foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRow {
    pub constraint_name: String,
    pub foreign_schema: String,
    pub foreign_table: String,
    pub foreign_column: String,
    pub local_column: String,
    pub ordinal_position: u32,
}

/// Groups index rows into one [`Index`] per index name.
///
/// The index type is taken from the first row of each group.
pub fn indexes(schema: &str, table: &str, rows: Vec<IndexRow>) -> Result<Vec<Index>> {
    group_rows(
        rows,
        |row| row.index_name.clone(),
        |row| Index {
            schema: schema.to_string(),
            table: table.to_string(),
            name: row.index_name.clone(),
            ty: IndexType::from_flags(row.primary, row.unique),
            columns: vec![],
        },
        |index, row| index.columns.push(row.column_name),
    )
}

/// Groups foreign key rows into one [`ForeignRelation`] per constraint.
///
/// The group key is the foreign schema, the foreign table and the constraint name, so two
/// constraints referencing the same table stay separate relations.
pub fn relations(rows: Vec<ForeignKeyRow>) -> Result<Vec<ForeignRelation>> {
    group_rows(
        rows,
        |row| {
            (
                row.foreign_schema.clone(),
                row.foreign_table.clone(),
                row.constraint_name.clone(),
            )
        },
        |row| ForeignRelation {
            name: row.constraint_name.clone(),
            foreign_schema: row.foreign_schema.clone(),
            foreign_table: row.foreign_table.clone(),
            columns: vec![],
            ty: RelationType::ZeroOneOrMore,
        },
        |relation, row| {
            relation.columns.push(ForeignColumn {
                foreign_column: row.foreign_column,
                local_column: row.local_column,
                ordinal_position: row.ordinal_position,
            })
        },
    )
}
