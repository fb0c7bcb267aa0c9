use chrono::{DateTime, Local};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use crate::core::{timestamp, AppError, Result};
use crate::modules::reports::models::LoyaltyReport;

pub const SHEET_NAME: &str = "Reporte Fidelizacion";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const FILENAME_PREFIX: &str = "reporte_fidelizacion_";

/// Header labels, in column order
pub const LOYALTY_COLUMNS: [&str; 8] = [
    "ID Cliente",
    "Documento",
    "Nombre",
    "Apellido",
    "Email",
    "Telefono",
    "Tipo Doc",
    "Total Compras",
];

/// A rendered report ready for download
#[derive(Debug, Clone)]
pub struct ReportExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ReportExport {
    /// Render `report`, stamping the filename with the wall-clock instant `generated_at`
    pub fn render(report: &LoyaltyReport, generated_at: DateTime<Local>) -> Result<Self> {
        Ok(Self {
            filename: report_filename(&generated_at),
            bytes: render_loyalty_workbook(report)?,
        })
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

/// `reporte_fidelizacion_<YYYYMMDD_HHMMSS>.xlsx`
pub fn report_filename(generated_at: &DateTime<Local>) -> String {
    format!("{}{}.xlsx", FILENAME_PREFIX, timestamp::file_stamp(generated_at))
}

/// Single-sheet workbook: one header row, then one row per customer
pub fn render_loyalty_workbook(report: &LoyaltyReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, label) in LOYALTY_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *label, &header)?;
    }

    for (index, customer) in report.customers.iter().enumerate() {
        let row = index as u32 + 1;
        let total = customer.total_purchases.to_f64().ok_or_else(|| {
            AppError::internal(format!(
                "Total {} cannot be written as a number",
                customer.total_purchases
            ))
        })?;

        worksheet.write_number(row, 0, customer.customer_id as f64)?;
        worksheet.write_string(row, 1, &customer.document_number)?;
        worksheet.write_string(row, 2, &customer.first_name)?;
        worksheet.write_string(row, 3, &customer.last_name)?;
        if let Some(email) = &customer.email {
            worksheet.write_string(row, 4, email)?;
        }
        if let Some(phone) = &customer.phone {
            worksheet.write_string(row, 5, phone)?;
        }
        worksheet.write_string(row, 6, &customer.document_type_code)?;
        worksheet.write_number(row, 7, total)?;
    }

    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}
