use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, CustomerProfile};
use crate::modules::customers::repositories::CustomerRepository;

/// Customer lookups
pub struct CustomerService {
    customer_repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customer_repo }
    }

    /// Fetch one customer by document number together with its purchase history.
    ///
    /// # Errors
    /// `AppError::CustomerNotFound` when no customer has that document number.
    pub async fn get_profile(&self, document_number: &str) -> Result<CustomerProfile> {
        let customer = self
            .customer_repo
            .find_by_document_number(document_number)
            .await?
            .ok_or_else(|| {
                debug!(document_number, "Customer lookup missed");
                AppError::CustomerNotFound
            })?;

        let purchases = self.customer_repo.list_purchases(customer.id).await?;
        let profile = CustomerProfile::new(customer, purchases);

        info!(
            customer_id = profile.customer.id,
            purchase_count = profile.purchase_count(),
            "Customer profile loaded"
        );

        Ok(profile)
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.customer_repo.list_all().await
    }
}
