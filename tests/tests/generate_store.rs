use tests::*;

use dbmap_core::config::{ProtoConfig, ProtoVersion};
use dbmap_proto::Generator;
use pretty_assertions::assert_eq;
use std::fs;

fn proto() -> ProtoConfig {
    ProtoConfig::new()
        .path("proto")
        .java_package("com.example")
        .objc_prefix("EX")
}

fn banner(schema: &str, message: &str) -> String {
    format!(
        "\
//-------------------------------------------------------------------
// This file is automatically generated from the database schema.
// ---- DO NOT MAKE CHANGES DIRECTLY TO THIS FILE! ----

syntax = \"proto3\";

package {schema};

option cc_enable_arenas = true;
option java_package = \"com.example.{schema}\";
option java_outer_classname = \"{message}Proto\";
option objc_class_prefix = \"EX\";

"
    )
}

async fn composite_foreign_key_becomes_one_field(test: DbTest) {
    test.create_store().await;

    let schema = test.schema();
    let db = test.read(test.store_generator()).await;
    let proto = proto();

    let out = Generator::new(&proto, true)
        .render(db.table(&schema, "user_product_part").unwrap())
        .unwrap();

    let expected = banner(&schema, "UserProductPart")
        + &format!(
            "\
// Foreign Key Imports

import \"{schema}/address.proto\";

// Other Datatype Imports

import \"google/protobuf/timestamp.proto\";

message UserProductPart {{
    int32 id = 1;
    optional {schema}.Address address = 2; // => street, zip
    string name = 3;
    google.protobuf.Timestamp created_at = 4;
}}
"
        );

    assert_eq!(out, expected);
}

async fn excluded_key_column_collapses_onto_the_rest(test: DbTest) {
    test.create_store().await;

    let schema = test.schema();
    let generator = test
        .store_generator()
        .exclude_columns(format!("{schema}.user_product_part"), ["zip"]);
    let db = test.read(generator).await;
    let proto = proto();
    let out_dir = tempfile::tempdir().unwrap();

    Generator::new(&proto, true)
        .generate(out_dir.path(), &db)
        .unwrap();

    let part = fs::read_to_string(
        out_dir
            .path()
            .join("proto")
            .join(&schema)
            .join("user_product_part.proto"),
    )
    .unwrap();

    assert!(part.ends_with(&format!(
        "\
message UserProductPart {{
    int32 id = 1;
    optional {schema}.Address address = 2; // => street
    string name = 3;
    google.protobuf.Timestamp created_at = 4;
}}
"
    )));
}

async fn repeated_foreign_table_is_numbered(test: DbTest) {
    test.create_store().await;

    let schema = test.schema();
    let db = test.read(test.store_generator()).await;
    let proto = proto();

    let out = Generator::new(&proto, true)
        .render(db.table(&schema, "shipment").unwrap())
        .unwrap();

    let expected = banner(&schema, "Shipment")
        + &format!(
            "\
// Foreign Key Imports

import \"{schema}/address.proto\";

message Shipment {{
    int32 id = 1;
    optional {schema}.Address address = 2; // => billing_street, billing_zip
    optional {schema}.Address address2 = 3; // => shipping_street, shipping_zip
    double weight = 4;
}}
"
        );

    assert_eq!(out, expected);
}

async fn plain_columns_without_embedding(test: DbTest) {
    test.create_store().await;

    let schema = test.schema();
    let db = test.read(test.store_generator()).await;
    let proto = proto().version(ProtoVersion::Proto2);

    let out = Generator::new(&proto, false)
        .render(db.table(&schema, "address").unwrap())
        .unwrap();

    let expected = banner(&schema, "Address").replace("proto3", "proto2")
        + "\
message Address {
    optional string street = 1;
    optional string zip = 2;
    optional string city = 3;
    optional string country = 4;
}
";

    assert_eq!(out, expected);
}

async fn writes_one_file_per_table(test: DbTest) {
    test.create_store().await;

    let schema = test.schema();
    let db = test.read(test.store_generator()).await;
    let proto = proto();
    let out_dir = tempfile::tempdir().unwrap();

    let written = Generator::new(&proto, true)
        .generate(out_dir.path(), &db)
        .unwrap();

    let dir = out_dir.path().join("proto").join(&schema);
    assert_eq!(
        written,
        [
            dir.join("address.proto"),
            dir.join("shipment.proto"),
            dir.join("user_account.proto"),
            dir.join("user_product_part.proto"),
        ]
    );
    assert!(!dir.join("schema_history.proto").exists());

    let account = fs::read_to_string(dir.join("user_account.proto")).unwrap();
    assert!(account.contains("    string email = 2;\n"));
    assert!(!account.contains("password_hash"));
}

async fn generation_is_deterministic(test: DbTest) {
    test.create_store().await;

    let schema = test.schema();
    let proto = proto();

    let mut runs = vec![];
    for _ in 0..2 {
        let db = test.read(test.store_generator()).await;
        let out_dir = tempfile::tempdir().unwrap();
        Generator::new(&proto, true)
            .generate(out_dir.path(), &db)
            .unwrap();

        let dir = out_dir.path().join("proto").join(&schema);
        let mut files = vec![];
        for name in ["address", "shipment", "user_account", "user_product_part"] {
            files.push(fs::read(dir.join(format!("{name}.proto"))).unwrap());
        }
        runs.push(files);
    }

    assert_eq!(runs[0], runs[1]);
}

tests!(
    composite_foreign_key_becomes_one_field,
    excluded_key_column_collapses_onto_the_rest,
    repeated_foreign_table_is_numbered,
    plain_columns_without_embedding,
    writes_one_file_per_table,
    generation_is_deterministic,
);
