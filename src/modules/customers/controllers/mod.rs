mod customer_controller;

pub use customer_controller::{
    configure, get_all_customers, get_customer_by_document, CustomerDetailResponse,
    CustomerListItem,
};
