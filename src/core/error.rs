use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use rust_decimal::Decimal;

use crate::core::format::format_thousands;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// No customer matches the requested document number
    #[error("Cliente no encontrado")]
    CustomerNotFound,

    /// The loyalty window contains no purchases at all
    #[error("No hay compras en el ultimo mes")]
    NoPurchasesInWindow,

    /// Purchases exist in the window but no customer total clears the threshold
    #[error("No hay clientes que superen el umbral de fidelizacion ({})", format_thousands(*threshold))]
    NoCustomersAboveThreshold { threshold: Decimal },

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Remote libSQL store rejected a statement or returned an unreadable payload
    #[error("Remote store error: {0}")]
    RemoteStore(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Spreadsheet rendering errors
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        if status_code.is_server_error() {
            tracing::error!(code = self.code(), "Request failed: {}", error_message);
        }

        HttpResponse::build(status_code).json(serde_json::json!({
            "detail": error_message,
            "error": {
                "code": self.code(),
                "message": error_message,
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::CustomerNotFound
            | AppError::NoPurchasesInWindow
            | AppError::NoCustomersAboveThreshold { .. }
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RemoteStore(_) => StatusCode::BAD_GATEWAY,
            AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    /// Machine-readable code carried next to the human-readable message
    pub fn code(&self) -> &'static str {
        match self {
            AppError::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            AppError::NoPurchasesInWindow => "NO_PURCHASES_IN_WINDOW",
            AppError::NoCustomersAboveThreshold { .. } => "NO_CUSTOMERS_ABOVE_THRESHOLD",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::RemoteStore(_) | AppError::HttpClient(_) => "STORE_UNAVAILABLE",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn remote_store(msg: impl Into<String>) -> Self {
        AppError::RemoteStore(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
