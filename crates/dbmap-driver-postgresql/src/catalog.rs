use crate::PostgreSQL;

use dbmap_core::{
    async_trait,
    schema::{
        catalog::{ForeignKeyRow, IndexRow},
        db::Column,
    },
    Catalog, Error, Result,
};
use tokio_postgres::{types::FromSql, Row};

pub(crate) const NAME: &str = "postgresql";

const SELECT_TABLES: &str = "\
SELECT table_name::text
FROM information_schema.tables
WHERE table_type = 'BASE TABLE'
    AND table_schema::text = $1::text
    AND NOT (table_name::text = ANY($2::text[]))
ORDER BY table_name";

const SELECT_COLUMNS: &str = "\
SELECT
    c.column_name::text,
    c.ordinal_position::int4,
    c.data_type::text,
    c.udt_name::regtype::text,
    c.column_default::text,
    c.is_nullable = 'YES',
    pa.attname IS NOT NULL,
    pg_get_serial_sequence(
        quote_ident(c.table_schema::text) || '.' || quote_ident(c.table_name::text),
        c.column_name::text
    ) IS NOT NULL
FROM pg_namespace ns
    JOIN pg_class t ON
        t.relnamespace = ns.oid
        AND t.relkind = 'r'
        AND t.relname = $2::text
    JOIN information_schema.columns c ON
        c.table_schema::text = ns.nspname::text
        AND c.table_name::text = t.relname::text
    LEFT OUTER JOIN pg_index pi ON
        pi.indrelid = t.oid
        AND pi.indisprimary
    LEFT OUTER JOIN pg_attribute pa ON
        pa.attrelid = pi.indrelid
        AND pa.attnum = ANY(pi.indkey)
        AND pa.attname::text = c.column_name::text
WHERE ns.nspname = $1::text
ORDER BY c.ordinal_position";

const SELECT_INDEXES: &str = "\
SELECT
    i.relname::text,
    a.attname::text,
    ix.indisunique,
    ix.indisprimary
FROM pg_class t
    JOIN pg_namespace ns ON ns.oid = t.relnamespace
    JOIN pg_index ix ON ix.indrelid = t.oid
    JOIN pg_class i ON i.oid = ix.indexrelid
    JOIN LATERAL unnest(ix.indkey::int2[]) WITH ORDINALITY AS k(attnum, part) ON true
    JOIN pg_attribute a ON a.attrelid = t.oid AND a.attnum = k.attnum
WHERE t.relkind = 'r'
    AND ns.nspname = $1::text
    AND t.relname = $2::text
ORDER BY i.relname, k.part";

const SELECT_FOREIGN_KEYS: &str = "\
SELECT DISTINCT
    kcu.constraint_name::text AS constraint_name,
    f_kcu.table_schema::text AS foreign_schema,
    f_kcu.table_name::text AS foreign_table,
    f_kcu.column_name::text AS foreign_column,
    kcu.column_name::text AS local_column,
    kcu.ordinal_position::int4 AS ordinal_position
FROM information_schema.key_column_usage kcu
    JOIN information_schema.referential_constraints rc ON
        rc.constraint_schema = kcu.constraint_schema
        AND rc.constraint_name = kcu.constraint_name
    JOIN information_schema.key_column_usage f_kcu ON
        f_kcu.constraint_schema = rc.unique_constraint_schema
        AND f_kcu.constraint_name = rc.unique_constraint_name
        AND f_kcu.ordinal_position = kcu.position_in_unique_constraint
WHERE kcu.table_schema::text = $1::text
    AND kcu.table_name::text = $2::text
    AND kcu.position_in_unique_constraint IS NOT NULL
ORDER BY foreign_schema, foreign_table, constraint_name, ordinal_position";

#[async_trait]
impl Catalog for PostgreSQL {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn tables(&self, schema: &str, excluded: &[String]) -> Result<Vec<String>> {
        let client = self.connection().await?;
        let rows = client
            .query(SELECT_TABLES, &[&schema, &excluded])
            .await
            .map_err(Error::query_failure)?;

        rows.iter().map(|row| get(row, 0)).collect()
    }

    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<Column>> {
        let client = self.connection().await?;
        let rows = client
            .query(SELECT_COLUMNS, &[&schema, &table])
            .await
            .map_err(Error::query_failure)?;

        rows.iter()
            .map(|row| {
                Ok(Column {
                    schema: schema.to_string(),
                    table: table.to_string(),
                    name: get(row, 0)?,
                    ordinal_position: get::<i32>(row, 1)? as u32,
                    data_type: get(row, 2)?,
                    udt_name: get(row, 3)?,
                    default: get(row, 4)?,
                    nullable: get(row, 5)?,
                    primary_key: get(row, 6)?,
                    sequence: get(row, 7)?,
                })
            })
            .collect()
    }

    async fn index_rows(&self, schema: &str, table: &str) -> Result<Vec<IndexRow>> {
        let client = self.connection().await?;
        let rows = client
            .query(SELECT_INDEXES, &[&schema, &table])
            .await
            .map_err(Error::query_failure)?;

        rows.iter()
            .map(|row| {
                Ok(IndexRow {
                    index_name: get(row, 0)?,
                    column_name: get(row, 1)?,
                    unique: get(row, 2)?,
                    primary: get(row, 3)?,
                })
            })
            .collect()
    }

    async fn foreign_key_rows(&self, schema: &str, table: &str) -> Result<Vec<ForeignKeyRow>> {
        let client = self.connection().await?;
        let rows = client
            .query(SELECT_FOREIGN_KEYS, &[&schema, &table])
            .await
            .map_err(Error::query_failure)?;

        rows.iter()
            .map(|row| {
                Ok(ForeignKeyRow {
                    constraint_name: get(row, 0)?,
                    foreign_schema: get(row, 1)?,
                    foreign_table: get(row, 2)?,
                    foreign_column: get(row, 3)?,
                    local_column: get(row, 4)?,
                    ordinal_position: get::<i32>(row, 5)? as u32,
                })
            })
            .collect()
    }
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, idx: usize) -> Result<T> {
    row.try_get(idx).map_err(Error::query_failure)
}
