use async_trait::async_trait;

use super::recurring_model::{NewRecurring, RecurringTransaction, RecurringUpdate};
use crate::errors::Result;
use crate::transactions::Transaction;

/// Trait defining the contract for recurring-template repository operations.
#[async_trait]
pub trait RecurringRepositoryTrait: Send + Sync {
    fn get_recurring(&self, id: &str) -> Result<RecurringTransaction>;
    fn list_recurring(
        &self,
        household_id: &str,
        active_only: bool,
    ) -> Result<Vec<RecurringTransaction>>;
    async fn create_recurring(&self, new_recurring: NewRecurring) -> Result<RecurringTransaction>;
    async fn update_recurring(
        &self,
        id: &str,
        update: RecurringUpdate,
    ) -> Result<RecurringTransaction>;
    async fn delete_recurring(&self, id: &str) -> Result<usize>;
}

/// Trait defining the contract for recurring-template service operations.
#[async_trait]
pub trait RecurringServiceTrait: Send + Sync {
    fn get_recurring(&self, id: &str) -> Result<RecurringTransaction>;
    fn list_recurring(
        &self,
        household_id: &str,
        active_only: bool,
    ) -> Result<Vec<RecurringTransaction>>;
    async fn create_recurring(&self, new_recurring: NewRecurring) -> Result<RecurringTransaction>;
    async fn update_recurring(
        &self,
        id: &str,
        update: RecurringUpdate,
    ) -> Result<RecurringTransaction>;
    async fn delete_recurring(&self, id: &str) -> Result<usize>;
    /// Materializes the template as a transaction dated on its due date and
    /// advances the due date by one period.
    async fn register_now(&self, id: &str) -> Result<Transaction>;
}
