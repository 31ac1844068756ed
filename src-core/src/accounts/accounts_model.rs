use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts_errors::AccountError;
use crate::constants::DEFAULT_CURRENCY;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Bank,
    Cash,
    CreditCard,
    DebitCard,
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Bank => "bank",
            AccountType::Cash => "cash",
            AccountType::CreditCard => "credit_card",
            AccountType::DebitCard => "debit_card",
            AccountType::Savings => "savings",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "bank" => Ok(AccountType::Bank),
            "cash" => Ok(AccountType::Cash),
            "credit_card" => Ok(AccountType::CreditCard),
            "debit_card" => Ok(AccountType::DebitCard),
            "savings" => Ok(AccountType::Savings),
            other => Err(Error::Account(AccountError::InvalidData(format!(
                "Unknown account type '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing an account. The balance is never stored; it is
/// always derived from the initial balance plus transaction effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub household_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
    pub initial_balance: Decimal,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub household_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub currency: Option<String>,
    pub initial_balance: Option<Decimal>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub sort_order: Option<i32>,
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Account(AccountError::InvalidData(
                "Account name cannot be empty".to_string(),
            )));
        }
        if let Some(currency) = &self.currency {
            if currency.trim().is_empty() {
                return Err(Error::Account(AccountError::InvalidData(
                    "Currency cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Partial update: only the provided fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
    pub initial_balance: Option<Decimal>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl AccountUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Account(AccountError::InvalidData(
                    "Account name cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Derived balance for one account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: String,
    pub balance: Decimal,
}

/// Database model for accounts
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub household_id: String,
    pub name: String,
    pub account_type: String,
    pub currency: String,
    pub initial_balance: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for partial updates
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
pub struct AccountUpdateDB {
    pub name: Option<String>,
    pub account_type: Option<String>,
    pub initial_balance: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub updated_at: String,
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self> {
        let account_type = AccountType::parse(&db.account_type)?;
        let initial_balance: Decimal = db.initial_balance.parse()?;
        Ok(Account {
            id: db.id,
            household_id: db.household_id,
            name: db.name,
            account_type,
            currency: db.currency,
            initial_balance,
            icon: db.icon,
            color: db.color,
            is_active: db.is_active,
            sort_order: db.sort_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: domain.id.unwrap_or_default(),
            household_id: domain.household_id,
            name: domain.name,
            account_type: domain.account_type.as_str().to_string(),
            currency: domain
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            initial_balance: domain.initial_balance.unwrap_or_default().to_string(),
            icon: domain.icon,
            color: domain.color,
            is_active: true,
            sort_order: domain.sort_order.unwrap_or(0),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl From<AccountUpdate> for AccountUpdateDB {
    fn from(domain: AccountUpdate) -> Self {
        Self {
            name: domain.name,
            account_type: domain.account_type.map(|t| t.as_str().to_string()),
            initial_balance: domain.initial_balance.map(|b| b.to_string()),
            icon: domain.icon,
            color: domain.color,
            is_active: domain.is_active,
            sort_order: domain.sort_order,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
