mod loyalty_report;

pub use loyalty_report::{LoyalCustomer, LoyaltyReport, WindowedPurchase};
