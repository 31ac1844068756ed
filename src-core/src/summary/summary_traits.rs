use async_trait::async_trait;

use super::summary_model::FinanceSummary;
use crate::errors::Result;

/// Trait defining the contract for the finance summary operations.
#[async_trait]
pub trait FinanceSummaryServiceTrait: Send + Sync {
    async fn get_summary(
        &self,
        household_id: &str,
        year: i32,
        month: u32,
    ) -> Result<FinanceSummary>;

    /// Summary enriched with percentage deltas against the previous month.
    async fn get_summary_with_comparison(
        &self,
        household_id: &str,
        year: i32,
        month: u32,
    ) -> Result<FinanceSummary>;
}
