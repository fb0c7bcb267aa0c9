pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{LoyalCustomer, LoyaltyReport, WindowedPurchase};
pub use repositories::{ReportRepository, SqlReportRepository};
pub use services::{ReportExport, ReportService};
