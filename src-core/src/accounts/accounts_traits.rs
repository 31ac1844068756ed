use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountBalance, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    fn get_by_id(&self, account_id: &str) -> Result<Account>;
    fn list(&self, household_id: &str, active_only: bool) -> Result<Vec<Account>>;
    async fn create(&self, new_account: NewAccount) -> Result<Account>;
    async fn update(&self, account_id: &str, update: AccountUpdate) -> Result<Account>;
    async fn delete(&self, account_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    fn get_account(&self, account_id: &str) -> Result<Account>;
    fn list_accounts(&self, household_id: &str, active_only: bool) -> Result<Vec<Account>>;
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;
    async fn update_account(&self, account_id: &str, update: AccountUpdate) -> Result<Account>;
    async fn delete_account(&self, account_id: &str) -> Result<()>;

    /// Derived balance: initial balance folded with every transaction touching
    /// the account up to the optional inclusive cutoff.
    fn get_account_balance(&self, account_id: &str, as_of: Option<NaiveDate>) -> Result<Decimal>;

    /// Balances for every account of a household, including inactive ones.
    /// Accounts whose balance cannot be computed are omitted.
    fn get_balances_for_household(
        &self,
        household_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<AccountBalance>>;
}
