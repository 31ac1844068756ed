use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::transactions_model::{
    CategorySpend, LedgerEntry, NewTransaction, Transaction, TransactionFilter, TransactionUpdate,
};
use crate::errors::Result;

/// Trait defining the contract for Transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, id: &str) -> Result<Transaction>;

    /// Filtered query, ordered by date then creation time, newest first.
    async fn search_transactions(&self, filter: TransactionFilter) -> Result<Vec<Transaction>>;

    /// Signed-effect rows for one account: every transaction whose source is
    /// the account, optionally cut off at an inclusive as-of date.
    fn account_ledger(
        &self,
        account_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<LedgerEntry>>;

    /// Amounts of transfers arriving at the account.
    fn incoming_transfers(
        &self,
        account_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<Decimal>>;

    /// Expense totals grouped by category over an inclusive date range.
    async fn expenses_by_category(
        &self,
        household_id: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<CategorySpend>>;

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, id: &str, update: TransactionUpdate)
        -> Result<Transaction>;
    async fn delete_transaction(&self, id: &str) -> Result<usize>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transaction(&self, id: &str) -> Result<Transaction>;
    async fn search_transactions(&self, filter: TransactionFilter) -> Result<Vec<Transaction>>;
    async fn expenses_by_category_for_month(
        &self,
        household_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<CategorySpend>>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, id: &str, update: TransactionUpdate)
        -> Result<Transaction>;
    async fn delete_transaction(&self, id: &str) -> Result<usize>;
}
