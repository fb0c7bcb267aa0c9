// Test Data Factory
//
// Inserts document types, customers and purchases through the same storage
// handle the application uses.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use customer_loyalty::core::timestamp;
use customer_loyalty::db::{Database, IdRow, SqlArg};
use rust_decimal::Decimal;

/// Fixed reference instant so window arithmetic is reproducible
pub fn reference_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 30)
        .unwrap()
        .and_hms_opt(15, 30, 0)
        .unwrap()
}

pub struct TestDataFactory;

impl TestDataFactory {
    pub async fn document_type(db: &Database, code: &str, name: &str) -> i64 {
        Self::insert_returning_id(
            db,
            "INSERT INTO document_types (code, name) VALUES (?, ?) RETURNING id",
            vec![SqlArg::from(code), SqlArg::from(name)],
        )
        .await
    }

    pub async fn customer(
        db: &Database,
        document_type_id: i64,
        document_number: &str,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> i64 {
        Self::insert_returning_id(
            db,
            r#"
            INSERT INTO customers (
                document_number, first_name, last_name, email, phone, document_type_id
            ) VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
            vec![
                SqlArg::from(document_number),
                SqlArg::from(first_name),
                SqlArg::from(last_name),
                SqlArg::from(email),
                SqlArg::from(phone),
                SqlArg::from(document_type_id),
            ],
        )
        .await
    }

    /// Customer with the `CC` document type, created on first use
    pub async fn simple_customer(db: &Database, document_number: &str) -> i64 {
        let document_type_id = match Self::find_document_type(db, "CC").await {
            Some(id) => id,
            None => Self::document_type(db, "CC", "Cedula de Ciudadania").await,
        };
        Self::customer(
            db,
            document_type_id,
            document_number,
            "Cliente",
            document_number,
            Some("cliente@example.com"),
            Some("3000000000"),
        )
        .await
    }

    pub async fn purchase_at(
        db: &Database,
        customer_id: i64,
        amount: Decimal,
        created_at: NaiveDateTime,
    ) {
        db.execute(
            "INSERT INTO purchases (amount, created_at, customer_id) VALUES (?, ?, ?)",
            &[
                SqlArg::Text(amount.to_string()),
                SqlArg::Text(timestamp::to_storage(created_at)),
                SqlArg::Integer(customer_id),
            ],
        )
        .await
        .unwrap_or_else(|e| panic!("Failed to insert purchase: {}", e));
    }

    pub async fn purchase_days_ago(
        db: &Database,
        customer_id: i64,
        amount: Decimal,
        days_ago: i64,
    ) {
        Self::purchase_at(db, customer_id, amount, reference_now() - Duration::days(days_ago))
            .await
    }

    async fn find_document_type(db: &Database, code: &str) -> Option<i64> {
        let row: Option<IdRow> = db
            .fetch_optional(
                "SELECT id FROM document_types WHERE code = ?",
                &[SqlArg::from(code)],
            )
            .await
            .unwrap();
        row.map(|r| r.id)
    }

    async fn insert_returning_id(db: &Database, sql: &str, args: Vec<SqlArg>) -> i64 {
        let row: Option<IdRow> = db
            .fetch_optional(sql, &args)
            .await
            .unwrap_or_else(|e| panic!("Insert failed: {}", e));
        row.expect("insert returned no id").id
    }
}
