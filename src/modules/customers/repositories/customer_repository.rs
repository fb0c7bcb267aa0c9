// Customer, document type and purchase reads.
//
// Relationships are resolved with explicit joins (customer -> document type)
// and one explicit purchases query per profile; nothing is loaded lazily.

use async_trait::async_trait;

use crate::core::format::parse_decimal;
use crate::core::{timestamp, Result};
use crate::db::{Database, FromRemoteRow, RemoteRow, SqlArg};
use crate::modules::customers::models::{Customer, DocumentType, Purchase};

const CUSTOMER_COLUMNS: &str = r#"
    c.id, c.document_number, c.first_name, c.last_name, c.email, c.phone,
    dt.id AS document_type_id, dt.code AS document_type_code, dt.name AS document_type_name
"#;

/// Read access to customers and their purchases
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Exact match on `document_number`
    async fn find_by_document_number(&self, document_number: &str) -> Result<Option<Customer>>;

    /// Full purchase history of one customer, oldest first
    async fn list_purchases(&self, customer_id: i64) -> Result<Vec<Purchase>>;

    /// Every customer, ordered by id
    async fn list_all(&self) -> Result<Vec<Customer>>;
}

/// Repository backed by the shared [`Database`] handle
pub struct SqlCustomerRepository {
    db: Database,
}

impl SqlCustomerRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn find_by_document_number(&self, document_number: &str) -> Result<Option<Customer>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM customers c
            JOIN document_types dt ON c.document_type_id = dt.id
            WHERE c.document_number = ?
            LIMIT 1
            "#,
            CUSTOMER_COLUMNS
        );

        let row: Option<CustomerRow> = self
            .db
            .fetch_optional(&sql, &[SqlArg::from(document_number)])
            .await?;

        Ok(row.map(Customer::from))
    }

    async fn list_purchases(&self, customer_id: i64) -> Result<Vec<Purchase>> {
        let rows: Vec<PurchaseRow> = self
            .db
            .fetch_all(
                r#"
                SELECT
                    id, customer_id,
                    CAST(amount AS TEXT) AS amount,
                    CAST(created_at AS TEXT) AS created_at
                FROM purchases
                WHERE customer_id = ?
                ORDER BY created_at, id
                "#,
                &[SqlArg::Integer(customer_id)],
            )
            .await?;

        rows.into_iter().map(Purchase::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Customer>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM customers c
            JOIN document_types dt ON c.document_type_id = dt.id
            ORDER BY c.id
            "#,
            CUSTOMER_COLUMNS
        );

        let rows: Vec<CustomerRow> = self.db.fetch_all(&sql, &[]).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

/// Customer joined with its document type
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    document_number: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    document_type_id: i64,
    document_type_code: String,
    document_type_name: String,
}

impl FromRemoteRow for CustomerRow {
    fn from_remote_row(row: &RemoteRow<'_>) -> Result<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
            document_number: row.get_string("document_number")?,
            first_name: row.get_string("first_name")?,
            last_name: row.get_string("last_name")?,
            email: row.get_opt_string("email")?,
            phone: row.get_opt_string("phone")?,
            document_type_id: row.get_i64("document_type_id")?,
            document_type_code: row.get_string("document_type_code")?,
            document_type_name: row.get_string("document_type_name")?,
        })
    }
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            document_number: row.document_number,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            document_type: DocumentType {
                id: row.document_type_id,
                code: row.document_type_code,
                name: row.document_type_name,
            },
        }
    }
}

/// Purchase with amount and timestamp read back as text
#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: i64,
    customer_id: i64,
    amount: String,
    created_at: String,
}

impl FromRemoteRow for PurchaseRow {
    fn from_remote_row(row: &RemoteRow<'_>) -> Result<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
            customer_id: row.get_i64("customer_id")?,
            amount: row.get_string("amount")?,
            created_at: row.get_string("created_at")?,
        })
    }
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = crate::core::AppError;

    fn try_from(row: PurchaseRow) -> Result<Self> {
        Ok(Purchase {
            id: row.id,
            customer_id: row.customer_id,
            amount: parse_decimal(&row.amount)?,
            created_at: timestamp::parse_stored(&row.created_at)?,
        })
    }
}
