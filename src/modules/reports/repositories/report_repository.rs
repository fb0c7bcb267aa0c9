use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::core::format::parse_decimal;
use crate::core::{timestamp, AppError, Result};
use crate::db::{Database, FromRemoteRow, RemoteRow, SqlArg};
use crate::modules::reports::models::WindowedPurchase;

/// Purchases created at or after the window start, inner-joined to their
/// customer and its document type. Rows come back grouped by customer so the
/// aggregation preserves ascending customer id for equal totals.
const WINDOWED_PURCHASES_SQL: &str = r#"
    SELECT
        p.id AS purchase_id,
        c.id AS customer_id,
        c.document_number,
        c.first_name,
        c.last_name,
        c.email,
        c.phone,
        dt.code AS document_type_code,
        CAST(p.amount AS TEXT) AS amount,
        CAST(p.created_at AS TEXT) AS created_at
    FROM purchases p
    JOIN customers c ON p.customer_id = c.id
    JOIN document_types dt ON c.document_type_id = dt.id
    WHERE p.created_at >= ?
    ORDER BY c.id, p.id
"#;

/// Repository for loyalty report queries
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Materialize the windowed join
    async fn purchases_since(&self, window_start: NaiveDateTime) -> Result<Vec<WindowedPurchase>>;
}

pub struct SqlReportRepository {
    db: Database,
}

impl SqlReportRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepository for SqlReportRepository {
    async fn purchases_since(&self, window_start: NaiveDateTime) -> Result<Vec<WindowedPurchase>> {
        let rows: Vec<WindowedPurchaseRow> = self
            .db
            .fetch_all(
                WINDOWED_PURCHASES_SQL,
                &[SqlArg::Text(timestamp::to_storage(window_start))],
            )
            .await?;

        rows.into_iter().map(WindowedPurchase::try_from).collect()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WindowedPurchaseRow {
    purchase_id: i64,
    customer_id: i64,
    document_number: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    document_type_code: String,
    amount: String,
    created_at: String,
}

impl FromRemoteRow for WindowedPurchaseRow {
    fn from_remote_row(row: &RemoteRow<'_>) -> Result<Self> {
        Ok(Self {
            purchase_id: row.get_i64("purchase_id")?,
            customer_id: row.get_i64("customer_id")?,
            document_number: row.get_string("document_number")?,
            first_name: row.get_string("first_name")?,
            last_name: row.get_string("last_name")?,
            email: row.get_opt_string("email")?,
            phone: row.get_opt_string("phone")?,
            document_type_code: row.get_string("document_type_code")?,
            amount: row.get_string("amount")?,
            created_at: row.get_string("created_at")?,
        })
    }
}

impl TryFrom<WindowedPurchaseRow> for WindowedPurchase {
    type Error = AppError;

    fn try_from(row: WindowedPurchaseRow) -> Result<Self> {
        Ok(WindowedPurchase {
            purchase_id: row.purchase_id,
            customer_id: row.customer_id,
            document_number: row.document_number,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            document_type_code: row.document_type_code,
            amount: parse_decimal(&row.amount)?,
            created_at: timestamp::parse_stored(&row.created_at)?,
        })
    }
}
