use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::budgets_model::{Budget, BudgetUpdate, BudgetUpsert, BudgetWithCategory};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::Result;

/// Service for per-category monthly spending ceilings
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        BudgetService { repository }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budget(&self, id: &str) -> Result<Budget> {
        self.repository.get_budget(id)
    }

    async fn get_budgets(
        &self,
        household_id: &str,
        year: i32,
        month: i32,
    ) -> Result<Vec<BudgetWithCategory>> {
        self.repository.get_budgets(household_id, year, month).await
    }

    async fn upsert_budget(&self, upsert: BudgetUpsert) -> Result<Budget> {
        upsert.validate()?;
        debug!(
            "Upserting budget for category {} in {:04}-{:02}",
            upsert.category_id, upsert.year, upsert.month
        );
        self.repository.upsert_budget(upsert).await
    }

    async fn update_budget(&self, id: &str, update: BudgetUpdate) -> Result<Budget> {
        update.validate()?;
        self.repository.update_budget(id, update).await
    }

    async fn delete_budget(&self, id: &str) -> Result<usize> {
        self.repository.delete_budget(id).await
    }
}
