//! Customer lookup and loyalty report service.
//!
//! Read-only HTTP API over document types, customers and purchases, plus a
//! spreadsheet export of customers whose purchases over a trailing window
//! exceed the loyalty threshold.

pub mod config;
pub mod core;
pub mod db;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::customers;
pub use modules::reports;
