pub mod error;
pub mod format;
pub mod timestamp;

pub use error::{AppError, Result};
