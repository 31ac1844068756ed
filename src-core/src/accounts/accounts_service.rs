use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountBalance, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::Result;
use crate::transactions::{TransactionRepositoryTrait, TransactionType};

/// Service for managing accounts and deriving their balances
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl AccountService {
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        AccountService {
            repository,
            transaction_repository,
        }
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn list_accounts(&self, household_id: &str, active_only: bool) -> Result<Vec<Account>> {
        self.repository.list(household_id, active_only)
    }

    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account '{}'", new_account.name);
        self.repository.create(new_account).await
    }

    async fn update_account(&self, account_id: &str, update: AccountUpdate) -> Result<Account> {
        update.validate()?;
        self.repository.update(account_id, update).await
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        self.repository.delete(account_id).await?;
        Ok(())
    }

    fn get_account_balance(&self, account_id: &str, as_of: Option<NaiveDate>) -> Result<Decimal> {
        let account = self.repository.get_by_id(account_id)?;

        let mut balance = account.initial_balance;

        for entry in self
            .transaction_repository
            .account_ledger(account_id, as_of)?
        {
            match entry.transaction_type {
                TransactionType::Income => balance += entry.amount,
                // Transfers out leave the account like an expense does.
                TransactionType::Expense | TransactionType::Transfer => balance -= entry.amount,
            }
        }

        for amount in self
            .transaction_repository
            .incoming_transfers(account_id, as_of)?
        {
            balance += amount;
        }

        Ok(balance)
    }

    fn get_balances_for_household(
        &self,
        household_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<AccountBalance>> {
        let accounts = self.repository.list(household_id, false)?;

        let mut balances = Vec::with_capacity(accounts.len());
        for account in accounts {
            match self.get_account_balance(&account.id, as_of) {
                Ok(balance) => balances.push(AccountBalance {
                    account_id: account.id,
                    balance,
                }),
                Err(e) => {
                    // Dashboard policy: a broken account drops out of the
                    // list instead of failing the whole request.
                    warn!("Skipping balance for account {}: {}", account.id, e);
                }
            }
        }

        Ok(balances)
    }
}
