use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DocumentType, Purchase};

/// Customer identity with its resolved document type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    /// Globally unique
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_type: DocumentType,
}

/// A customer together with its complete purchase history
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    pub customer: Customer,
    pub purchases: Vec<Purchase>,
}

impl CustomerProfile {
    pub fn new(customer: Customer, purchases: Vec<Purchase>) -> Self {
        Self {
            customer,
            purchases,
        }
    }

    /// All-time sum of purchase amounts; derived on every call, never stored
    pub fn total_purchases(&self) -> Decimal {
        self.purchases.iter().map(|p| p.amount).sum()
    }

    pub fn purchase_count(&self) -> usize {
        self.purchases.len()
    }
}
