use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single sale, immutable once recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub customer_id: i64,
    /// Non-negative monetary amount
    pub amount: Decimal,
    /// UTC creation instant
    pub created_at: NaiveDateTime,
}
