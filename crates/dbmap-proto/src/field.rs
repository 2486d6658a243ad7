use dbmap_core::{
    schema::db::{Column, ForeignColumn, ForeignRelation, Table},
    Error, Result,
};

use std::collections::{HashMap, HashSet};

/// The ordered fields of one generated message.
///
/// Field numbers are positions in the list, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList<'a> {
    fields: Vec<Field<'a>>,
}

/// One message field: a column, possibly standing in for a whole foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub column: &'a Column,

    /// Set when `column` is the representative of a foreign key.
    pub relation: Option<ResolvedRelation<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelation<'a> {
    pub relation: &'a ForeignRelation,

    /// Key parts whose local column is still in the table, in key order. Columns removed
    /// by an exclusion are left out.
    pub keys: Vec<&'a ForeignColumn>,

    /// Field name: the foreign table name, suffixed with a counter from the second relation
    /// to the same foreign table on (`address`, `address2`, ...). Names taken by plain
    /// columns are skipped.
    pub map_name: String,
}

/// A relation that takes part in resolution, with the key parts present in the table.
struct Embeddable<'a> {
    relation: &'a ForeignRelation,
    keys: Vec<&'a ForeignColumn>,
}

impl<'a> FieldList<'a> {
    /// Every column as a plain field, in column order.
    pub fn plain(table: &'a Table) -> FieldList<'a> {
        FieldList {
            fields: table
                .columns
                .iter()
                .map(|column| Field {
                    column,
                    relation: None,
                })
                .collect(),
        }
    }

    /// Collapses each foreign key into a single field at the position of its first key
    /// column. The remaining key columns of the relation are dropped.
    ///
    /// Key parts whose column is not in the table (excluded columns) are ignored; a
    /// relation left without any key part is skipped. Many-to-many relations are skipped
    /// and their columns stay plain. Relations that share a local column are rejected.
    pub fn resolve(table: &'a Table) -> Result<FieldList<'a>> {
        let relations = embeddable_relations(table)?;

        let taken: HashSet<&str> = table
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .filter(|name| !relations.iter().any(|e| e.has_local_column(name)))
            .collect();

        let mut fields = vec![];
        let mut per_foreign_table = HashMap::<&str, usize>::new();

        for column in &table.columns {
            let Some(embeddable) = relations
                .iter()
                .find(|embeddable| embeddable.has_local_column(&column.name))
            else {
                fields.push(Field {
                    column,
                    relation: None,
                });
                continue;
            };

            let Some(representative) = embeddable.representative() else {
                continue;
            };

            if representative.local_column != column.name {
                continue;
            }

            let relation = embeddable.relation;
            let count = per_foreign_table
                .entry(relation.foreign_table.as_str())
                .or_default();

            let map_name = loop {
                *count += 1;
                let name = match *count {
                    1 => relation.foreign_table.clone(),
                    n => format!("{}{}", relation.foreign_table, n),
                };
                if !taken.contains(name.as_str()) {
                    break name;
                }
            };

            fields.push(Field {
                column,
                relation: Some(ResolvedRelation {
                    relation,
                    keys: embeddable.keys.clone(),
                    map_name,
                }),
            });
        }

        Ok(FieldList { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field<'a>> {
        self.fields.iter()
    }

    /// Fields paired with their 1-based field number.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Field<'a>)> + '_ {
        self.fields.iter().enumerate().map(|(i, field)| (i + 1, field))
    }

    /// Resolved relations, in field order.
    pub fn relations(&self) -> impl Iterator<Item = &ResolvedRelation<'a>> + '_ {
        self.fields.iter().filter_map(|field| field.relation.as_ref())
    }

    pub fn field(&self, name: &str) -> Option<&Field<'a>> {
        self.fields.iter().find(|field| field.name() == name)
    }
}

impl<'a, 'b> IntoIterator for &'b FieldList<'a> {
    type Item = &'b Field<'a>;
    type IntoIter = std::slice::Iter<'b, Field<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Field<'_> {
    /// The field name in the generated message.
    pub fn name(&self) -> &str {
        match &self.relation {
            Some(resolved) => &resolved.map_name,
            None => &self.column.name,
        }
    }

    pub fn is_relation(&self) -> bool {
        self.relation.is_some()
    }
}

impl ResolvedRelation<'_> {
    /// Local key columns joined for the trailing comment, e.g. `street, zip`.
    pub fn local_keys(&self) -> String {
        self.keys
            .iter()
            .map(|key| key.local_column.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> Embeddable<'a> {
    fn has_local_column(&self, name: &str) -> bool {
        self.keys.iter().any(|key| key.local_column == name)
    }

    /// The present key part with the lowest ordinal position.
    fn representative(&self) -> Option<&'a ForeignColumn> {
        self.keys.iter().copied().min_by_key(|key| key.ordinal_position)
    }
}

fn embeddable_relations(table: &Table) -> Result<Vec<Embeddable<'_>>> {
    let mut relations: Vec<Embeddable<'_>> = vec![];

    for relation in &table.relations {
        if relation.ty.is_many_to_many() {
            log::warn!(
                "skipping many-to-many relation {} on {}",
                relation.name,
                table.qualified_name()
            );
            continue;
        }

        if relation.columns.is_empty() {
            return Err(Error::invalid_relation(format!(
                "relation {} on {} has no key columns",
                relation.name,
                table.qualified_name()
            )));
        }

        let keys: Vec<_> = relation
            .columns
            .iter()
            .filter(|key| table.column(&key.local_column).is_some())
            .collect();

        if keys.is_empty() {
            log::warn!(
                "skipping relation {} on {}: all key columns are excluded",
                relation.name,
                table.qualified_name()
            );
            continue;
        }

        for key in &keys {
            let local = key.local_column.as_str();
            if let Some(other) = relations.iter().find(|other| other.has_local_column(local)) {
                return Err(Error::invalid_relation(format!(
                    "relations {} and {} on {} share column {}",
                    other.relation.name,
                    relation.name,
                    table.qualified_name(),
                    local
                )));
            }
        }

        relations.push(Embeddable { relation, keys });
    }

    Ok(relations)
}
