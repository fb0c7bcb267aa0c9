use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the materialized purchase -> customer -> document type join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowedPurchase {
    pub purchase_id: i64,
    pub customer_id: i64,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_type_code: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

/// Per-customer aggregate over the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyalCustomer {
    pub customer_id: i64,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_type_code: String,
    /// Sum of the customer's in-window purchase amounts
    pub total_purchases: Decimal,
    pub purchase_count: usize,
}

impl LoyalCustomer {
    /// Open a group from its first purchase
    pub fn from_first_purchase(purchase: &WindowedPurchase) -> Self {
        Self {
            customer_id: purchase.customer_id,
            document_number: purchase.document_number.clone(),
            first_name: purchase.first_name.clone(),
            last_name: purchase.last_name.clone(),
            email: purchase.email.clone(),
            phone: purchase.phone.clone(),
            document_type_code: purchase.document_type_code.clone(),
            total_purchases: Decimal::ZERO,
            purchase_count: 0,
        }
    }

    pub fn add(&mut self, amount: Decimal) {
        self.total_purchases += amount;
        self.purchase_count += 1;
    }
}

/// Customers above the loyalty threshold, highest total first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyReport {
    /// Reference instant the window ends at
    pub as_of: NaiveDateTime,
    /// Inclusive start of the window
    pub window_start: NaiveDateTime,
    pub threshold: Decimal,
    pub customers: Vec<LoyalCustomer>,
}

impl LoyaltyReport {
    pub fn grand_total(&self) -> Decimal {
        self.customers.iter().map(|c| c.total_purchases).sum()
    }
}
