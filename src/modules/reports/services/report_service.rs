use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::LoyaltyConfig;
use crate::core::{timestamp, AppError, Result};
use crate::modules::reports::models::{LoyalCustomer, LoyaltyReport, WindowedPurchase};
use crate::modules::reports::repositories::ReportRepository;

/// Service for generating the loyalty report
pub struct ReportService {
    report_repo: Arc<dyn ReportRepository>,
    settings: LoyaltyConfig,
}

impl ReportService {
    pub fn new(report_repo: Arc<dyn ReportRepository>, settings: LoyaltyConfig) -> Self {
        Self {
            report_repo,
            settings,
        }
    }

    /// Generate the loyalty report for the window ending at `now`.
    ///
    /// Read-only: runs a single windowed query and folds it in memory.
    ///
    /// # Errors
    /// * `NoPurchasesInWindow` if no purchase falls inside the window
    /// * `NoCustomersAboveThreshold` if no customer total is strictly above the threshold
    /// * storage errors, propagated as-is
    pub async fn generate_loyalty_report(&self, now: NaiveDateTime) -> Result<LoyaltyReport> {
        let window_start = timestamp::window_start(now, self.settings.window_days)?;

        info!(
            as_of = %now,
            window_start = %window_start,
            threshold = %self.settings.threshold,
            "Generating loyalty report"
        );

        let purchases = self.report_repo.purchases_since(window_start).await?;

        match build_loyalty_report(now, &self.settings, &purchases) {
            Ok(report) => {
                info!(
                    customers = report.customers.len(),
                    purchases = purchases.len(),
                    grand_total = %report.grand_total(),
                    "Loyalty report generated"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(purchases = purchases.len(), "Loyalty report is empty: {}", err);
                Err(err)
            }
        }
    }
}

/// Group purchases by customer id and sum their amounts.
///
/// Groups appear in the order their customer is first seen.
pub fn aggregate_by_customer(purchases: &[WindowedPurchase]) -> Vec<LoyalCustomer> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut groups: Vec<LoyalCustomer> = Vec::new();

    for purchase in purchases {
        let slot = *index.entry(purchase.customer_id).or_insert_with(|| {
            groups.push(LoyalCustomer::from_first_purchase(purchase));
            groups.len() - 1
        });
        groups[slot].add(purchase.amount);
    }

    groups
}

/// Keep groups strictly above `threshold`, highest total first.
///
/// The sort is stable, so equal totals keep their incoming order.
pub fn select_loyal(groups: Vec<LoyalCustomer>, threshold: Decimal) -> Vec<LoyalCustomer> {
    let mut loyal: Vec<LoyalCustomer> = groups
        .into_iter()
        .filter(|group| group.total_purchases > threshold)
        .collect();
    loyal.sort_by(|a, b| b.total_purchases.cmp(&a.total_purchases));
    loyal
}

/// Window filter, aggregation, threshold and ordering over a materialized join
pub fn build_loyalty_report(
    now: NaiveDateTime,
    settings: &LoyaltyConfig,
    purchases: &[WindowedPurchase],
) -> Result<LoyaltyReport> {
    let window_start = timestamp::window_start(now, settings.window_days)?;

    let in_window: Vec<WindowedPurchase> = purchases
        .iter()
        .filter(|p| p.created_at >= window_start)
        .cloned()
        .collect();
    if in_window.is_empty() {
        return Err(AppError::NoPurchasesInWindow);
    }

    let customers = select_loyal(aggregate_by_customer(&in_window), settings.threshold);
    if customers.is_empty() {
        return Err(AppError::NoCustomersAboveThreshold {
            threshold: settings.threshold,
        });
    }

    Ok(LoyaltyReport {
        as_of: now,
        window_start,
        threshold: settings.threshold,
        customers,
    })
}
