mod report_service;
mod spreadsheet;

pub use report_service::{aggregate_by_customer, build_loyalty_report, select_loyal, ReportService};
pub use spreadsheet::{
    render_loyalty_workbook, report_filename, ReportExport, LOYALTY_COLUMNS, SHEET_NAME,
    XLSX_CONTENT_TYPE,
};
