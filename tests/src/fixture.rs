//! DDL for the tables every engine test reads back.
//!
//! Column types are picked so all engines map them to the same message fields, which lets
//! the tests share one expected rendering per table.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Sqlite,
    MySQL,
    PostgreSQL,
}

/// A small store schema:
///
/// * `address` has a composite primary key
/// * `user_product_part` references it with a composite foreign key
/// * `shipment` references it twice
/// * `user_account` carries a column the generator config excludes
/// * `schema_history` is excluded as a whole
pub fn store(flavor: Flavor) -> Vec<String> {
    let id = match flavor {
        Flavor::Sqlite => "INTEGER PRIMARY KEY",
        Flavor::MySQL => "INT AUTO_INCREMENT PRIMARY KEY",
        Flavor::PostgreSQL => "SERIAL PRIMARY KEY",
    };

    vec![
        "CREATE TABLE address (\
            street VARCHAR(64) NOT NULL, \
            zip VARCHAR(16) NOT NULL, \
            city VARCHAR(64), \
            country VARCHAR(64), \
            PRIMARY KEY (street, zip))"
            .to_string(),
        format!(
            "CREATE TABLE user_product_part (\
                id {id}, \
                street VARCHAR(64), \
                zip VARCHAR(16), \
                name VARCHAR(64) NOT NULL, \
                created_at TIMESTAMP NULL, \
                CONSTRAINT fk_part_address FOREIGN KEY (street, zip) \
                    REFERENCES address (street, zip))"
        ),
        format!(
            "CREATE TABLE shipment (\
                id {id}, \
                billing_street VARCHAR(64), \
                billing_zip VARCHAR(16), \
                shipping_street VARCHAR(64), \
                shipping_zip VARCHAR(16), \
                weight DECIMAL(10, 2), \
                CONSTRAINT fk_shipment_billing FOREIGN KEY (billing_street, billing_zip) \
                    REFERENCES address (street, zip), \
                CONSTRAINT fk_shipment_shipping FOREIGN KEY (shipping_street, shipping_zip) \
                    REFERENCES address (street, zip))"
        ),
        format!(
            "CREATE TABLE user_account (\
                id {id}, \
                email VARCHAR(128) NOT NULL, \
                password_hash VARCHAR(128))"
        ),
        "CREATE UNIQUE INDEX user_account_email_idx ON user_account (email)".to_string(),
        "CREATE TABLE schema_history (version VARCHAR(32) NOT NULL)".to_string(),
    ]
}
