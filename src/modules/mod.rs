pub mod customers;
pub mod health;
pub mod home;
pub mod reports;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::AppError;

/// Register every HTTP route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(home::configure)
        .configure(health::configure)
        .configure(customers::controllers::configure)
        .configure(reports::controllers::configure);
}

/// Fallback for unmatched routes, rendered with the common error body
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(format!("Ruta no encontrada: {}", req.path())))
}
