use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::transactions_model::{
    month_bounds, CategorySpend, NewTransaction, Transaction, TransactionFilter, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;

/// Service for recording and querying transactions
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { repository }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transaction(&self, id: &str) -> Result<Transaction> {
        self.repository.get_transaction(id)
    }

    async fn search_transactions(&self, filter: TransactionFilter) -> Result<Vec<Transaction>> {
        self.repository.search_transactions(filter).await
    }

    async fn expenses_by_category_for_month(
        &self,
        household_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<CategorySpend>> {
        let (from_date, to_date) = month_bounds(year, month)?;
        self.repository
            .expenses_by_category(household_id, from_date, to_date)
            .await
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        debug!(
            "Creating {} transaction for account {}",
            new_transaction.transaction_type.as_str(),
            new_transaction.account_id
        );
        self.repository.create_transaction(new_transaction).await
    }

    async fn update_transaction(
        &self,
        id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        update.validate()?;
        self.repository.update_transaction(id, update).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<usize> {
        self.repository.delete_transaction(id).await
    }
}
