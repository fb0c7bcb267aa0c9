mod report_controller;

pub use report_controller::{configure, get_loyalty_report};
