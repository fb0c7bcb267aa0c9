use serde::{Deserialize, Serialize};

/// Classification of an identity-document number (citizen ID, tax ID, passport)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    pub id: i64,
    /// Unique short code, e.g. "CC", "NIT", "PAS"
    pub code: String,
    pub name: String,
}
