use crate::MySQL;

use dbmap_core::{
    async_trait, err,
    schema::{
        catalog::{ForeignKeyRow, IndexRow},
        db::Column,
    },
    Catalog, Error, Result,
};
use mysql_async::{prelude::FromValue, prelude::Queryable, Row};

pub(crate) const NAME: &str = "mysql";

const SELECT_TABLES: &str = "\
SELECT TABLE_NAME
FROM information_schema.TABLES
WHERE TABLE_TYPE = 'BASE TABLE'
    AND TABLE_SCHEMA = ?
ORDER BY TABLE_NAME";

const SELECT_COLUMNS: &str = "\
SELECT
    COLUMN_NAME,
    ORDINAL_POSITION,
    LOWER(DATA_TYPE),
    COLUMN_DEFAULT,
    IS_NULLABLE = 'YES',
    COLUMN_KEY = 'PRI',
    EXTRA LIKE '%auto_increment%'
FROM information_schema.COLUMNS
WHERE TABLE_SCHEMA = ?
    AND TABLE_NAME = ?
ORDER BY ORDINAL_POSITION";

const SELECT_INDEXES: &str = "\
SELECT
    INDEX_NAME,
    COLUMN_NAME,
    NON_UNIQUE = 0,
    INDEX_NAME = 'PRIMARY'
FROM information_schema.STATISTICS
WHERE TABLE_SCHEMA = ?
    AND TABLE_NAME = ?
ORDER BY INDEX_NAME, SEQ_IN_INDEX";

const SELECT_FOREIGN_KEYS: &str = "\
SELECT
    CONSTRAINT_NAME,
    REFERENCED_TABLE_SCHEMA,
    REFERENCED_TABLE_NAME,
    REFERENCED_COLUMN_NAME,
    COLUMN_NAME,
    ORDINAL_POSITION
FROM information_schema.KEY_COLUMN_USAGE
WHERE TABLE_SCHEMA = ?
    AND TABLE_NAME = ?
    AND REFERENCED_TABLE_NAME IS NOT NULL
ORDER BY REFERENCED_TABLE_SCHEMA, REFERENCED_TABLE_NAME, CONSTRAINT_NAME, ORDINAL_POSITION";

impl MySQL {
    async fn query(&self, sql: &str, schema: &str, table: Option<&str>) -> Result<Vec<Row>> {
        let mut conn = self.connection().await?;

        let rows = match table {
            Some(table) => conn.exec(sql, (schema, table)).await,
            None => conn.exec(sql, (schema,)).await,
        };

        rows.map_err(Error::query_failure)
    }
}

#[async_trait]
impl Catalog for MySQL {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn tables(&self, schema: &str, excluded: &[String]) -> Result<Vec<String>> {
        let rows = self.query(SELECT_TABLES, schema, None).await?;

        let mut tables = vec![];
        for row in &rows {
            let name: String = get(row, 0)?;
            if !excluded.contains(&name) {
                tables.push(name);
            }
        }
        Ok(tables)
    }

    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<Column>> {
        let rows = self.query(SELECT_COLUMNS, schema, Some(table)).await?;

        rows.iter()
            .map(|row| {
                let data_type: String = get(row, 2)?;
                Ok(Column {
                    schema: schema.to_string(),
                    table: table.to_string(),
                    name: get(row, 0)?,
                    ordinal_position: get(row, 1)?,
                    udt_name: data_type.clone(),
                    data_type,
                    default: get(row, 3)?,
                    nullable: get(row, 4)?,
                    primary_key: get(row, 5)?,
                    sequence: get(row, 6)?,
                })
            })
            .collect()
    }

    async fn index_rows(&self, schema: &str, table: &str) -> Result<Vec<IndexRow>> {
        let rows = self.query(SELECT_INDEXES, schema, Some(table)).await?;

        let mut index_rows = vec![];
        for row in &rows {
            let index_name: String = get(row, 0)?;

            // Functional key parts have no column
            let Some(column_name) = get::<Option<String>>(row, 1)? else {
                log::debug!("skipping expression key part of index {index_name}");
                continue;
            };

            index_rows.push(IndexRow {
                index_name,
                column_name,
                unique: get(row, 2)?,
                primary: get(row, 3)?,
            });
        }
        Ok(index_rows)
    }

    async fn foreign_key_rows(&self, schema: &str, table: &str) -> Result<Vec<ForeignKeyRow>> {
        let rows = self.query(SELECT_FOREIGN_KEYS, schema, Some(table)).await?;

        rows.iter()
            .map(|row| {
                Ok(ForeignKeyRow {
                    constraint_name: get(row, 0)?,
                    foreign_schema: get(row, 1)?,
                    foreign_table: get(row, 2)?,
                    foreign_column: get(row, 3)?,
                    local_column: get(row, 4)?,
                    ordinal_position: get(row, 5)?,
                })
            })
            .collect()
    }
}

fn get<T: FromValue>(row: &Row, idx: usize) -> Result<T> {
    match row.get_opt(idx) {
        Some(value) => value.map_err(Error::query_failure),
        None => Err(err!("catalog row has no column {idx}")),
    }
}
