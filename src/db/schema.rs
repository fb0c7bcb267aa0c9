use tracing::info;

use crate::core::Result;
use crate::db::Database;

/// Table and index definitions, applied in order
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS document_types (
        id INTEGER NOT NULL PRIMARY KEY,
        code VARCHAR(10) NOT NULL UNIQUE,
        name VARCHAR(100) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER NOT NULL PRIMARY KEY,
        document_number VARCHAR(50) NOT NULL UNIQUE,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        email VARCHAR(100),
        phone VARCHAR(20),
        document_type_id INTEGER NOT NULL REFERENCES document_types (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_customers_document_number ON customers (document_number)",
    r#"
    CREATE TABLE IF NOT EXISTS purchases (
        id INTEGER NOT NULL PRIMARY KEY,
        amount REAL NOT NULL CHECK (amount >= 0),
        created_at TEXT NOT NULL,
        customer_id INTEGER NOT NULL REFERENCES customers (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_purchases_created_at ON purchases (created_at)",
    "CREATE INDEX IF NOT EXISTS ix_purchases_customer_id ON purchases (customer_id)",
];

/// Create missing tables and indexes; existing data is left untouched
pub async fn ensure_schema(db: &Database) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        db.execute(statement, &[]).await?;
    }
    info!(backend = db.backend(), "Database schema ready");
    Ok(())
}
