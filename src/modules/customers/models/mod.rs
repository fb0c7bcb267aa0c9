mod customer;
mod document_type;
mod purchase;

pub use customer::{Customer, CustomerProfile};
pub use document_type::DocumentType;
pub use purchase::Purchase;
