use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::accounts_errors::AccountError;
use super::accounts_model::{Account, AccountType, AccountUpdate, NewAccount};
use super::accounts_service::AccountService;
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{Error, Result};
use crate::transactions::{
    CategorySpend, LedgerEntry, NewTransaction, Transaction, TransactionError, TransactionFilter,
    TransactionRepositoryTrait, TransactionType, TransactionUpdate,
};

fn account(id: &str, initial_balance: Decimal) -> Account {
    Account {
        id: id.to_string(),
        household_id: "h1".to_string(),
        name: format!("Account {}", id),
        account_type: AccountType::Bank,
        currency: "CLP".to_string(),
        initial_balance,
        icon: None,
        color: None,
        is_active: true,
        sort_order: 0,
        created_at: "2025-01-01T00:00:00Z".to_string(),
        updated_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

#[derive(Default)]
struct MockAccountRepository {
    accounts: Vec<Account>,
}

#[async_trait]
impl AccountRepositoryTrait for MockAccountRepository {
    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .ok_or_else(|| {
                Error::Account(AccountError::NotFound(format!(
                    "Account with id {} not found",
                    account_id
                )))
            })
    }

    fn list(&self, household_id: &str, active_only: bool) -> Result<Vec<Account>> {
        Ok(self
            .accounts
            .iter()
            .filter(|a| a.household_id == household_id && (!active_only || a.is_active))
            .cloned()
            .collect())
    }

    async fn create(&self, _new_account: NewAccount) -> Result<Account> {
        unimplemented!()
    }

    async fn update(&self, _account_id: &str, _update: AccountUpdate) -> Result<Account> {
        unimplemented!()
    }

    async fn delete(&self, _account_id: &str) -> Result<usize> {
        unimplemented!()
    }
}

#[derive(Default)]
struct MockTransactionRepository {
    ledgers: HashMap<String, Vec<LedgerEntry>>,
    incoming: HashMap<String, Vec<Decimal>>,
    failing_accounts: Vec<String>,
}

#[async_trait]
impl TransactionRepositoryTrait for MockTransactionRepository {
    fn get_transaction(&self, _id: &str) -> Result<Transaction> {
        unimplemented!()
    }

    async fn search_transactions(&self, _filter: TransactionFilter) -> Result<Vec<Transaction>> {
        unimplemented!()
    }

    fn account_ledger(
        &self,
        account_id: &str,
        _as_of: Option<NaiveDate>,
    ) -> Result<Vec<LedgerEntry>> {
        if self.failing_accounts.iter().any(|id| id == account_id) {
            return Err(Error::Transaction(TransactionError::DatabaseError(
                "ledger unavailable".to_string(),
            )));
        }
        Ok(self.ledgers.get(account_id).cloned().unwrap_or_default())
    }

    fn incoming_transfers(
        &self,
        account_id: &str,
        _as_of: Option<NaiveDate>,
    ) -> Result<Vec<Decimal>> {
        Ok(self.incoming.get(account_id).cloned().unwrap_or_default())
    }

    async fn expenses_by_category(
        &self,
        _household_id: &str,
        _from_date: NaiveDate,
        _to_date: NaiveDate,
    ) -> Result<Vec<CategorySpend>> {
        unimplemented!()
    }

    async fn create_transaction(&self, _new_transaction: NewTransaction) -> Result<Transaction> {
        unimplemented!()
    }

    async fn update_transaction(
        &self,
        _id: &str,
        _update: TransactionUpdate,
    ) -> Result<Transaction> {
        unimplemented!()
    }

    async fn delete_transaction(&self, _id: &str) -> Result<usize> {
        unimplemented!()
    }
}

fn entry(transaction_type: TransactionType, amount: Decimal) -> LedgerEntry {
    LedgerEntry {
        transaction_type,
        amount,
    }
}

#[test]
fn balance_folds_all_transaction_effects() {
    // Initial 100 000; income 50 000; expense 20 000; transfer-out 10 000.
    let accounts = MockAccountRepository {
        accounts: vec![account("a", dec!(100000)), account("b", dec!(5000))],
    };
    let mut ledgers = HashMap::new();
    ledgers.insert(
        "a".to_string(),
        vec![
            entry(TransactionType::Income, dec!(50000)),
            entry(TransactionType::Expense, dec!(20000)),
            entry(TransactionType::Transfer, dec!(10000)),
        ],
    );
    let mut incoming = HashMap::new();
    incoming.insert("b".to_string(), vec![dec!(10000)]);

    let transactions = MockTransactionRepository {
        ledgers,
        incoming,
        failing_accounts: vec![],
    };
    let service = AccountService::new(Arc::new(accounts), Arc::new(transactions));

    assert_eq!(service.get_account_balance("a", None).unwrap(), dec!(120000));
    assert_eq!(service.get_account_balance("b", None).unwrap(), dec!(15000));
}

#[test]
fn balance_is_order_independent() {
    let entries = vec![
        entry(TransactionType::Expense, dec!(20000)),
        entry(TransactionType::Income, dec!(50000)),
        entry(TransactionType::Transfer, dec!(10000)),
        entry(TransactionType::Income, dec!(1234.56)),
    ];

    let mut permuted = entries.clone();
    permuted.reverse();

    for ledger in [entries, permuted] {
        let accounts = MockAccountRepository {
            accounts: vec![account("a", dec!(100000))],
        };
        let mut ledgers = HashMap::new();
        ledgers.insert("a".to_string(), ledger);
        let transactions = MockTransactionRepository {
            ledgers,
            incoming: HashMap::new(),
            failing_accounts: vec![],
        };
        let service = AccountService::new(Arc::new(accounts), Arc::new(transactions));
        assert_eq!(
            service.get_account_balance("a", None).unwrap(),
            dec!(121234.56)
        );
    }
}

#[test]
fn missing_account_is_an_error_not_a_zero_balance() {
    let service = AccountService::new(
        Arc::new(MockAccountRepository::default()),
        Arc::new(MockTransactionRepository::default()),
    );

    let err = service.get_account_balance("ghost", None).unwrap_err();
    assert!(matches!(err, Error::Account(AccountError::NotFound(_))));
}

#[test]
fn household_balances_skip_failing_accounts() {
    let mut broken = account("b", dec!(100));
    broken.is_active = false;

    let accounts = MockAccountRepository {
        accounts: vec![account("a", dec!(1000)), broken],
    };
    let transactions = MockTransactionRepository {
        ledgers: HashMap::new(),
        incoming: HashMap::new(),
        failing_accounts: vec!["b".to_string()],
    };
    let service = AccountService::new(Arc::new(accounts), Arc::new(transactions));

    let balances = service.get_balances_for_household("h1", None).unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].account_id, "a");
    assert_eq!(balances[0].balance, dec!(1000));
}

#[test]
fn inactive_accounts_are_included_in_household_balances() {
    let mut closed = account("c", dec!(42));
    closed.is_active = false;

    let accounts = MockAccountRepository {
        accounts: vec![closed],
    };
    let service = AccountService::new(
        Arc::new(accounts),
        Arc::new(MockTransactionRepository::default()),
    );

    let balances = service.get_balances_for_household("h1", None).unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].balance, dec!(42));
}
