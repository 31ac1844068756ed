use async_trait::async_trait;

use super::budgets_model::{Budget, BudgetUpdate, BudgetUpsert, BudgetWithCategory};
use crate::errors::Result;

/// Trait defining the contract for Budget repository operations.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget(&self, id: &str) -> Result<Budget>;

    /// All budget rows for the period, joined with category display metadata.
    async fn get_budgets(
        &self,
        household_id: &str,
        year: i32,
        month: i32,
    ) -> Result<Vec<BudgetWithCategory>>;

    /// Single conditional write on the natural key: inserts the row or, when
    /// one already exists for (household, category, year, month), updates its
    /// amount and threshold. Never produces a duplicate.
    async fn upsert_budget(&self, upsert: BudgetUpsert) -> Result<Budget>;

    async fn update_budget(&self, id: &str, update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, id: &str) -> Result<usize>;
}

/// Trait defining the contract for Budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budget(&self, id: &str) -> Result<Budget>;
    async fn get_budgets(
        &self,
        household_id: &str,
        year: i32,
        month: i32,
    ) -> Result<Vec<BudgetWithCategory>>;
    async fn upsert_budget(&self, upsert: BudgetUpsert) -> Result<Budget>;
    async fn update_budget(&self, id: &str, update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, id: &str) -> Result<usize>;
}
