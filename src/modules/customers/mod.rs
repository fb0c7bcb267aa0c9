pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Customer, CustomerProfile, DocumentType, Purchase};
pub use repositories::{CustomerRepository, SqlCustomerRepository};
pub use services::CustomerService;
