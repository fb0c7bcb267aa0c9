// Loyalty report export
//
// The workbook is an OOXML zip archive; these tests check the artifact shape
// and the naming contract of the download.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use chrono::{Local, NaiveDate, TimeZone};
use customer_loyalty::reports::services::{
    render_loyalty_workbook, report_filename, ReportExport, LOYALTY_COLUMNS, SHEET_NAME,
    XLSX_CONTENT_TYPE,
};
use customer_loyalty::reports::{LoyalCustomer, LoyaltyReport};
use rust_decimal_macros::dec;

fn sample_report() -> LoyaltyReport {
    let as_of = NaiveDate::from_ymd_opt(2025, 6, 30)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    LoyaltyReport {
        as_of,
        window_start: as_of - chrono::Duration::days(30),
        threshold: dec!(5000000),
        customers: vec![
            LoyalCustomer {
                customer_id: 1,
                document_number: "1234567890".to_string(),
                first_name: "Juan".to_string(),
                last_name: "Garcia Rodriguez".to_string(),
                email: Some("juan.garcia@email.com".to_string()),
                phone: Some("3001234567".to_string()),
                document_type_code: "CC".to_string(),
                total_purchases: dec!(5500000),
                purchase_count: 3,
            },
            LoyalCustomer {
                customer_id: 3,
                document_number: "P-778899".to_string(),
                first_name: "Maria".to_string(),
                last_name: "Lopez".to_string(),
                email: None,
                phone: None,
                document_type_code: "PAS".to_string(),
                total_purchases: dec!(5000000.50),
                purchase_count: 1,
            },
        ],
    }
}

fn read_sheet(bytes: Vec<u8>) -> (Vec<String>, Range<Data>) {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
    let sheets = workbook.sheet_names();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    (sheets, range)
}

fn is_blank(cell: Option<&Data>) -> bool {
    matches!(cell, None | Some(Data::Empty))
}

#[test]
fn test_workbook_is_zip_archive() {
    let bytes = render_loyalty_workbook(&sample_report()).unwrap();

    assert!(bytes.len() > 100);
    assert_eq!(&bytes[..2], b"PK", "xlsx files are zip archives");
}

#[test]
fn test_filename_uses_generation_instant() {
    let generated_at = Local.with_ymd_and_hms(2025, 7, 4, 9, 5, 7).unwrap();

    assert_eq!(
        report_filename(&generated_at),
        "reporte_fidelizacion_20250704_090507.xlsx"
    );
}

#[test]
fn test_export_carries_download_headers() {
    let generated_at = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let export = ReportExport::render(&sample_report(), generated_at).unwrap();

    assert_eq!(
        export.content_disposition(),
        "attachment; filename=reporte_fidelizacion_20250102_030405.xlsx"
    );
    assert!(!export.bytes.is_empty());
    assert!(XLSX_CONTENT_TYPE.ends_with("spreadsheetml.sheet"));
}

#[test]
fn test_column_labels_and_sheet_name() {
    assert_eq!(
        LOYALTY_COLUMNS,
        [
            "ID Cliente",
            "Documento",
            "Nombre",
            "Apellido",
            "Email",
            "Telefono",
            "Tipo Doc",
            "Total Compras"
        ]
    );
    assert_eq!(SHEET_NAME, "Reporte Fidelizacion");
}

#[test]
fn test_workbook_has_single_named_sheet() {
    let (sheets, _) = read_sheet(render_loyalty_workbook(&sample_report()).unwrap());
    assert_eq!(sheets, vec![SHEET_NAME.to_string()]);
}

#[test]
fn test_header_row_holds_column_labels() {
    let (_, range) = read_sheet(render_loyalty_workbook(&sample_report()).unwrap());

    for (col, label) in LOYALTY_COLUMNS.iter().enumerate() {
        assert_eq!(
            range.get_value((0, col as u32)),
            Some(&Data::String(label.to_string())),
            "header column {}",
            col
        );
    }
}

#[test]
fn test_customer_rows_follow_column_order() {
    let (_, range) = read_sheet(render_loyalty_workbook(&sample_report()).unwrap());

    assert_eq!(range.height(), 3);
    assert_eq!(range.get_value((1, 0)), Some(&Data::Float(1.0)));
    assert_eq!(
        range.get_value((1, 1)),
        Some(&Data::String("1234567890".to_string()))
    );
    assert_eq!(range.get_value((1, 2)), Some(&Data::String("Juan".to_string())));
    assert_eq!(
        range.get_value((1, 3)),
        Some(&Data::String("Garcia Rodriguez".to_string()))
    );
    assert_eq!(
        range.get_value((1, 4)),
        Some(&Data::String("juan.garcia@email.com".to_string()))
    );
    assert_eq!(
        range.get_value((1, 5)),
        Some(&Data::String("3001234567".to_string()))
    );
    assert_eq!(range.get_value((1, 6)), Some(&Data::String("CC".to_string())));
    assert_eq!(range.get_value((1, 7)), Some(&Data::Float(5500000.0)));

    assert_eq!(range.get_value((2, 0)), Some(&Data::Float(3.0)));
    assert_eq!(
        range.get_value((2, 1)),
        Some(&Data::String("P-778899".to_string()))
    );
    assert_eq!(range.get_value((2, 6)), Some(&Data::String("PAS".to_string())));
    assert_eq!(range.get_value((2, 7)), Some(&Data::Float(5000000.5)));
}

#[test]
fn test_missing_contact_fields_are_empty_cells() {
    let (_, range) = read_sheet(render_loyalty_workbook(&sample_report()).unwrap());

    assert!(is_blank(range.get_value((2, 4))), "email should be empty");
    assert!(is_blank(range.get_value((2, 5))), "phone should be empty");
}
