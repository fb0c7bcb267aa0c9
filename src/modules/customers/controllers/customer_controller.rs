use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::db::Database;
use crate::modules::customers::models::{Customer, CustomerProfile};
use crate::modules::customers::repositories::SqlCustomerRepository;
use crate::modules::customers::services::CustomerService;

/// Response body of GET /api/customer/{doc_number}
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerDetailResponse {
    pub id: i64,
    pub document_number: String,
    pub document_type_code: String,
    pub document_type_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_purchases: Decimal,
    pub purchase_count: usize,
}

/// Item of GET /api/customers
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerListItem {
    pub id: i64,
    pub document_number: String,
    pub document_type_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<CustomerProfile> for CustomerDetailResponse {
    fn from(profile: CustomerProfile) -> Self {
        let total_purchases = profile.total_purchases();
        let purchase_count = profile.purchase_count();
        let customer = profile.customer;

        Self {
            id: customer.id,
            document_number: customer.document_number,
            document_type_code: customer.document_type.code,
            document_type_name: customer.document_type.name,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone: customer.phone,
            total_purchases,
            purchase_count,
        }
    }
}

impl From<Customer> for CustomerListItem {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            document_number: customer.document_number,
            document_type_code: customer.document_type.code,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone: customer.phone,
        }
    }
}

fn customer_service(db: &web::Data<Database>) -> CustomerService {
    CustomerService::new(Arc::new(SqlCustomerRepository::new(db.get_ref().clone())))
}

/// GET /api/customer/{doc_number}
///
/// Customer identity, document type and all-time purchase totals.
/// 404 with "Cliente no encontrado" when the document number is unknown.
pub async fn get_customer_by_document(
    db: web::Data<Database>,
    doc_number: web::Path<String>,
) -> Result<HttpResponse> {
    let profile = customer_service(&db).get_profile(&doc_number).await?;
    Ok(HttpResponse::Ok().json(CustomerDetailResponse::from(profile)))
}

/// GET /api/customers
pub async fn get_all_customers(db: web::Data<Database>) -> Result<HttpResponse> {
    let customers = customer_service(&db).list_customers().await?;
    let items: Vec<CustomerListItem> = customers.into_iter().map(CustomerListItem::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// Configure routes for customers module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/customer/{doc_number}",
        web::get().to(get_customer_by_document),
    )
    .route("/api/customers", web::get().to(get_all_customers));
}
