mod report_repository;

pub use report_repository::{ReportRepository, SqlReportRepository};
