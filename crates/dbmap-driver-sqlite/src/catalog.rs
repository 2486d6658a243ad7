use crate::Sqlite;

use dbmap_core::{
    async_trait,
    schema::{
        catalog::{ForeignKeyRow, IndexRow},
        db::Column,
    },
    Catalog, Error, Result,
};
use rusqlite::{params, Connection};

pub(crate) const NAME: &str = "sqlite";

const SELECT_TABLES: &str = "\
SELECT name
FROM pragma_table_list
WHERE schema = ?1
    AND type = 'table'
    AND name NOT LIKE 'sqlite_%'
ORDER BY name";

const SELECT_WITHOUT_ROWID: &str = "\
SELECT wr
FROM pragma_table_list
WHERE schema = ?1
    AND name = ?2";

const SELECT_COLUMNS: &str = "\
SELECT name, cid + 1, type, dflt_value, \"notnull\", pk
FROM pragma_table_info(?2, ?1)
ORDER BY cid";

const SELECT_INDEXES: &str = "\
SELECT il.name, ii.name, il.\"unique\", il.origin = 'pk'
FROM pragma_index_list(?2, ?1) AS il
    JOIN pragma_index_info(il.name, ?1) AS ii
ORDER BY il.name, ii.seqno";

const SELECT_FOREIGN_KEYS: &str = "\
SELECT
    fk.id,
    fk.\"table\",
    COALESCE(
        fk.\"to\",
        (SELECT ti.name FROM pragma_table_info(fk.\"table\", ?1) AS ti WHERE ti.pk = fk.seq + 1)
    ),
    fk.\"from\",
    fk.seq + 1
FROM pragma_foreign_key_list(?2, ?1) AS fk
ORDER BY fk.\"table\", fk.id, fk.seq";

#[async_trait]
impl Catalog for Sqlite {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn tables(&self, schema: &str, excluded: &[String]) -> Result<Vec<String>> {
        tables(&*self.connection()?, schema, excluded)
    }

    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<Column>> {
        columns(&*self.connection()?, schema, table)
    }

    async fn index_rows(&self, schema: &str, table: &str) -> Result<Vec<IndexRow>> {
        index_rows(&*self.connection()?, schema, table)
    }

    async fn foreign_key_rows(&self, schema: &str, table: &str) -> Result<Vec<ForeignKeyRow>> {
        foreign_key_rows(&*self.connection()?, schema, table)
    }
}

fn tables(connection: &Connection, schema: &str, excluded: &[String]) -> Result<Vec<String>> {
    let mut stmt = connection
        .prepare_cached(SELECT_TABLES)
        .map_err(Error::query_failure)?;

    let names = stmt
        .query_map([schema], |row| row.get::<_, String>(0))
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(Error::query_failure)?;

    Ok(names
        .into_iter()
        .filter(|name| !excluded.contains(name))
        .collect())
}

fn columns(connection: &Connection, schema: &str, table: &str) -> Result<Vec<Column>> {
    let mut stmt = connection
        .prepare_cached(SELECT_COLUMNS)
        .map_err(Error::query_failure)?;

    let mut columns = stmt
        .query_map(params![schema, table], |row| {
            let ty = row.get::<_, String>(2)?.to_lowercase();
            Ok(Column {
                schema: schema.to_string(),
                table: table.to_string(),
                name: row.get(0)?,
                ordinal_position: row.get(1)?,
                data_type: ty.clone(),
                udt_name: ty,
                default: row.get(3)?,
                nullable: !row.get::<_, bool>(4)?,
                primary_key: row.get::<_, u32>(5)? > 0,
                sequence: false,
            })
        })
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(Error::query_failure)?;

    // A lone `INTEGER PRIMARY KEY` aliases the rowid, so SQLite assigns its value
    let mut primary_key = columns.iter_mut().filter(|column| column.primary_key);
    if let (Some(column), None) = (primary_key.next(), primary_key.next()) {
        if column.udt_name == "integer" && !without_rowid(connection, schema, table)? {
            column.sequence = true;
        }
    }

    Ok(columns)
}

fn without_rowid(connection: &Connection, schema: &str, table: &str) -> Result<bool> {
    connection
        .query_row(SELECT_WITHOUT_ROWID, params![schema, table], |row| row.get(0))
        .map_err(Error::query_failure)
}

fn index_rows(connection: &Connection, schema: &str, table: &str) -> Result<Vec<IndexRow>> {
    let mut stmt = connection
        .prepare_cached(SELECT_INDEXES)
        .map_err(Error::query_failure)?;

    let rows = stmt
        .query_map(params![schema, table], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, bool>(2)?,
                row.get::<_, bool>(3)?,
            ))
        })
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(Error::query_failure)?;

    let mut index_rows = vec![];
    for (index_name, column_name, unique, primary) in rows {
        // Expression key parts have no column
        let Some(column_name) = column_name else {
            log::debug!("skipping expression key part of index {index_name}");
            continue;
        };

        index_rows.push(IndexRow {
            index_name,
            column_name,
            unique,
            primary,
        });
    }

    // Rowid tables keep their primary key in the table b-tree, not in an index
    if !index_rows.iter().any(|row| row.primary) {
        let index_name = primary_key_index_name(&index_rows, table);

        for column in columns(connection, schema, table)? {
            if column.primary_key {
                index_rows.push(IndexRow {
                    index_name: index_name.clone(),
                    column_name: column.name,
                    unique: true,
                    primary: true,
                });
            }
        }
    }

    Ok(index_rows)
}

/// `{table}_pkey`, suffixed with a counter when a user index already has that name.
fn primary_key_index_name(index_rows: &[IndexRow], table: &str) -> String {
    let taken = |name: &str| index_rows.iter().any(|row| row.index_name == name);

    let mut name = format!("{table}_pkey");
    let mut n = 1;
    while taken(&name) {
        n += 1;
        name = format!("{table}_pkey{n}");
    }
    name
}

fn foreign_key_rows(
    connection: &Connection,
    schema: &str,
    table: &str,
) -> Result<Vec<ForeignKeyRow>> {
    let mut stmt = connection
        .prepare_cached(SELECT_FOREIGN_KEYS)
        .map_err(Error::query_failure)?;

    stmt.query_map(params![schema, table], |row| {
        let id: i64 = row.get(0)?;
        let local_column: String = row.get(3)?;

        Ok(ForeignKeyRow {
            // SQLite does not report constraint names
            constraint_name: format!("{table}_fk{id}"),
            foreign_schema: schema.to_string(),
            foreign_table: row.get(1)?,
            foreign_column: row
                .get::<_, Option<String>>(2)?
                .unwrap_or_else(|| local_column.clone()),
            local_column,
            ordinal_position: row.get(4)?,
        })
    })
    .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
    .map_err(Error::query_failure)
}
