use std::sync::Arc;

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::{Local, Utc};
use tracing::info;

use crate::config::LoyaltyConfig;
use crate::core::Result;
use crate::db::Database;
use crate::modules::reports::repositories::SqlReportRepository;
use crate::modules::reports::services::{ReportExport, ReportService, XLSX_CONTENT_TYPE};

/// GET /api/loyalty-report
///
/// Spreadsheet of customers whose purchases over the trailing window exceed
/// the loyalty threshold. 404 when the window is empty or nobody qualifies.
pub async fn get_loyalty_report(
    db: web::Data<Database>,
    settings: web::Data<LoyaltyConfig>,
) -> Result<HttpResponse> {
    let report_repo = SqlReportRepository::new(db.get_ref().clone());
    let report_service = ReportService::new(Arc::new(report_repo), settings.get_ref().clone());

    let report = report_service
        .generate_loyalty_report(Utc::now().naive_utc())
        .await?;
    let export = ReportExport::render(&report, Local::now())?;

    info!(
        filename = %export.filename,
        size = export.bytes.len(),
        "Loyalty report exported"
    );

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((header::CONTENT_DISPOSITION, export.content_disposition()))
        .body(export.bytes))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/loyalty-report", web::get().to(get_loyalty_report));
}
