//! Contract tests for GET /api/loyalty-report

#[path = "../helpers/mod.rs"]
mod helpers;

use std::io::Cursor;

use actix_web::http::header;
use actix_web::{test, web, App};
use calamine::{Data, Reader, Xlsx};
use chrono::{Duration, Utc};
use customer_loyalty::config::LoyaltyConfig;
use customer_loyalty::modules;
use helpers::*;
use rust_decimal_macros::dec;
use serde_json::Value;

// The endpoint anchors its window at the real clock, so data is placed
// relative to `Utc::now()` rather than the fixed reference instant.
async fn purchase_days_before_now(
    db: &customer_loyalty::db::Database,
    customer_id: i64,
    amount: rust_decimal::Decimal,
    days: i64,
) {
    TestDataFactory::purchase_at(
        db,
        customer_id,
        amount,
        Utc::now().naive_utc() - Duration::days(days),
    )
    .await;
}

#[actix_web::test]
async fn test_report_download_headers() {
    let db = create_test_database().await;
    let customer = TestDataFactory::simple_customer(&db, "1234567890").await;
    purchase_days_before_now(&db, customer, dec!(2500000), 5).await;
    purchase_days_before_now(&db, customer, dec!(1800000), 10).await;
    purchase_days_before_now(&db, customer, dec!(1200000), 15).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(LoyaltyConfig::default()))
            .configure(modules::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/loyalty-report").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert_eq!(
        content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let filename = disposition
        .strip_prefix("attachment; filename=")
        .expect("attachment disposition");
    let stamp = filename
        .strip_prefix("reporte_fidelizacion_")
        .and_then(|rest| rest.strip_suffix(".xlsx"))
        .expect("filename pattern");
    assert_eq!(stamp.len(), 15);
    assert_eq!(&stamp[8..9], "_");
    assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));

    let body = test::read_body(resp).await;
    assert_eq!(&body[..2], b"PK");
}

#[actix_web::test]
async fn test_report_without_purchases_returns_404() {
    let db = create_test_database().await;
    let customer = TestDataFactory::simple_customer(&db, "1").await;
    purchase_days_before_now(&db, customer, dec!(9000000), 45).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(LoyaltyConfig::default()))
            .configure(modules::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/loyalty-report").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "No hay compras en el ultimo mes");
    assert_eq!(body["error"]["code"], "NO_PURCHASES_IN_WINDOW");
}

#[actix_web::test]
async fn test_report_below_threshold_returns_404() {
    let db = create_test_database().await;
    let customer = TestDataFactory::simple_customer(&db, "900123456-1").await;
    purchase_days_before_now(&db, customer, dec!(350000), 20).await;
    purchase_days_before_now(&db, customer, dec!(150000), 25).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(LoyaltyConfig::default()))
            .configure(modules::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/loyalty-report").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["detail"],
        "No hay clientes que superen el umbral de fidelizacion (5,000,000)"
    );
    assert_eq!(body["error"]["code"], "NO_CUSTOMERS_ABOVE_THRESHOLD");
}

#[actix_web::test]
async fn test_report_honours_configured_threshold() {
    let db = create_test_database().await;
    let customer = TestDataFactory::simple_customer(&db, "900123456-1").await;
    purchase_days_before_now(&db, customer, dec!(350000), 2).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(LoyaltyConfig {
                window_days: 30,
                threshold: dec!(100000),
            }))
            .configure(modules::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/loyalty-report").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_report_rows_sorted_by_total() {
    let db = create_test_database().await;
    let smaller = TestDataFactory::simple_customer(&db, "111").await;
    let larger = TestDataFactory::simple_customer(&db, "222").await;
    purchase_days_before_now(&db, smaller, dec!(5100000), 3).await;
    purchase_days_before_now(&db, larger, dec!(4000000), 4).await;
    purchase_days_before_now(&db, larger, dec!(4000000), 6).await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(LoyaltyConfig::default()))
            .configure(modules::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/loyalty-report").to_request();
    let body = test::call_and_read_body(&app, req).await;

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(body.to_vec())).unwrap();
    let range = workbook.worksheet_range("Reporte Fidelizacion").unwrap();

    assert_eq!(range.height(), 3);
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("222".to_string())));
    assert_eq!(range.get_value((1, 7)), Some(&Data::Float(8000000.0)));
    assert_eq!(range.get_value((2, 1)), Some(&Data::String("111".to_string())));
    assert_eq!(range.get_value((2, 7)), Some(&Data::Float(5100000.0)));
}

#[actix_web::test]
async fn test_oversized_window_is_an_error_response() {
    let db = create_test_database().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(LoyaltyConfig {
                window_days: 200_000_000,
                threshold: dec!(5000000),
            }))
            .configure(modules::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/loyalty-report").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
}
