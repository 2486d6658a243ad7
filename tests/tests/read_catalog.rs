use tests::*;

use dbmap_core::schema::db::{IndexType, RelationType};
use pretty_assertions::assert_eq;

async fn reads_configured_tables_by_name(test: DbTest) {
    test.create_store().await;

    let db = test.read(test.store_generator()).await;

    assert_eq!(db.schemas.len(), 1);
    assert_eq!(db.schemas[0].name, test.schema());

    let names: Vec<_> = db.tables().map(|table| table.name.as_str()).collect();
    assert_eq!(
        names,
        ["address", "shipment", "user_account", "user_product_part"]
    );
}

async fn reads_columns_in_ordinal_order(test: DbTest) {
    test.create_store().await;

    let db = test.read(test.store_generator()).await;
    let part = db.table(&test.schema(), "user_product_part").unwrap();

    let columns: Vec<_> = part
        .columns
        .iter()
        .map(|column| (column.name.as_str(), column.ordinal_position))
        .collect();
    assert_eq!(
        columns,
        [
            ("id", 1),
            ("street", 2),
            ("zip", 3),
            ("name", 4),
            ("created_at", 5)
        ]
    );

    let id = part.column("id").unwrap();
    assert!(id.primary_key);
    assert!(id.sequence);
    assert!(id.is_optional());

    let name = part.column("name").unwrap();
    assert!(!name.nullable);
    assert!(!name.is_optional());

    assert!(part.column("created_at").unwrap().nullable);
}

async fn excluded_columns_are_dropped(test: DbTest) {
    test.create_store().await;

    let db = test.read(test.store_generator()).await;
    let account = db.table(&test.schema(), "user_account").unwrap();

    let names: Vec<_> = account.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["id", "email"]);
}

async fn exclusions_are_optional(test: DbTest) {
    test.create_store().await;

    let generator = dbmap_core::config::GeneratorConfig::new().schema(test.schema());
    let db = test.read(generator).await;

    assert!(db.table(&test.schema(), "schema_history").is_some());
    assert!(db
        .table(&test.schema(), "user_account")
        .unwrap()
        .column("password_hash")
        .is_some());
}

async fn composite_primary_key(test: DbTest) {
    test.create_store().await;

    let db = test.read(test.store_generator()).await;
    let address = db.table(&test.schema(), "address").unwrap();

    let pk = address.primary_key().unwrap();
    assert_eq!(pk.ty, IndexType::PrimaryKey);
    assert_eq!(pk.columns, ["street", "zip"]);

    let pk_columns: Vec<_> = address
        .primary_key_columns()
        .map(|column| column.name.as_str())
        .collect();
    assert_eq!(pk_columns, ["street", "zip"]);
}

async fn unique_index(test: DbTest) {
    test.create_store().await;

    let db = test.read(test.store_generator()).await;
    let account = db.table(&test.schema(), "user_account").unwrap();

    let email = account
        .indices
        .iter()
        .find(|index| index.columns == ["email"])
        .unwrap();
    assert_eq!(email.ty, IndexType::Unique);
    assert!(email.is_unique());
    assert!(!email.is_primary_key());
}

async fn composite_foreign_key_is_one_relation(test: DbTest) {
    test.create_store().await;

    let db = test.read(test.store_generator()).await;
    let part = db.table(&test.schema(), "user_product_part").unwrap();

    assert_eq!(part.relations.len(), 1);

    let relation = &part.relations[0];
    assert_eq!(relation.foreign_schema, test.schema());
    assert_eq!(relation.foreign_table, "address");
    assert_eq!(relation.ty, RelationType::ZeroOneOrMore);

    let keys: Vec<_> = relation
        .columns
        .iter()
        .map(|c| {
            (
                c.local_column.as_str(),
                c.foreign_column.as_str(),
                c.ordinal_position,
            )
        })
        .collect();
    assert_eq!(keys, [("street", "street", 1), ("zip", "zip", 2)]);
}

async fn two_relations_to_the_same_table(test: DbTest) {
    test.create_store().await;

    let db = test.read(test.store_generator()).await;
    let shipment = db.table(&test.schema(), "shipment").unwrap();

    assert_eq!(shipment.relations.len(), 2);
    assert_ne!(shipment.relations[0].name, shipment.relations[1].name);
    assert!(shipment
        .relations
        .iter()
        .all(|relation| relation.foreign_table == "address" && relation.columns.len() == 2));

    let mut locals: Vec<Vec<&str>> = shipment
        .relations
        .iter()
        .map(|relation| relation.local_columns().collect())
        .collect();
    locals.sort();
    assert_eq!(
        locals,
        [
            vec!["billing_street", "billing_zip"],
            vec!["shipping_street", "shipping_zip"]
        ]
    );
}

async fn missing_schema_reads_empty(test: DbTest) {
    let generator = dbmap_core::config::GeneratorConfig::new().schema("no_such_schema");
    let db = test.read(generator).await;

    assert_eq!(db.schemas.len(), 1);
    assert!(db.schemas[0].tables.is_empty());
}

tests!(
    reads_configured_tables_by_name,
    reads_columns_in_ordinal_order,
    excluded_columns_are_dropped,
    exclusions_are_optional,
    composite_primary_key,
    unique_index,
    composite_foreign_key_is_one_relation,
    two_relations_to_the_same_table,
    missing_schema_reads_empty,
);
