use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_errors::TransactionError;
use crate::errors::{Error, Result, ValidationError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive [first day, last day] range of a calendar month. The last day is
/// the day before the first of the next month, which handles month lengths and
/// leap years.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidDate(format!(
            "{:04}-{:02}",
            year, month
        )))
    })?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| {
            Error::Validation(ValidationError::InvalidDate(format!(
                "{:04}-{:02}",
                year, month
            )))
        })?;
    Ok((first, last))
}

/// Direction of a financial event. The sign of the effect on an account is
/// implied by the type; amounts themselves are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            "transfer" => Ok(TransactionType::Transfer),
            other => Err(Error::Transaction(TransactionError::InvalidData(format!(
                "Unknown transaction type '{}'",
                other
            )))),
        }
    }
}

/// Category display metadata carried along with a transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Domain model for a single financial event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub household_id: String,
    pub profile_id: String,
    pub account_id: String,
    pub category_id: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub transfer_to_account_id: Option<String>,
    pub recurring_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub category: Option<CategoryRef>,
}

/// Input model for recording a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub household_id: String,
    pub profile_id: String,
    pub account_id: String,
    pub category_id: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub transfer_to_account_id: Option<String>,
    pub recurring_id: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::Transaction(TransactionError::InvalidData(
                "Amount must be greater than zero".to_string(),
            )));
        }
        match self.transaction_type {
            TransactionType::Transfer => match &self.transfer_to_account_id {
                None => Err(Error::Transaction(TransactionError::InvalidData(
                    "Transfer requires a destination account".to_string(),
                ))),
                Some(dest) if *dest == self.account_id => {
                    Err(Error::Transaction(TransactionError::InvalidData(
                        "Transfer destination must differ from the source account".to_string(),
                    )))
                }
                Some(_) => Ok(()),
            },
            _ => {
                if self.transfer_to_account_id.is_some() {
                    return Err(Error::Transaction(TransactionError::InvalidData(
                        "Only transfers may carry a destination account".to_string(),
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Partial update: only the provided fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
}

impl TransactionUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                return Err(Error::Transaction(TransactionError::InvalidData(
                    "Amount must be greater than zero".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Equality/range predicates for transaction queries
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub household_id: String,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub account_id: Option<String>,
    pub category_id: Option<String>,
    pub transaction_type: Option<TransactionType>,
}

/// One signed-effect row of an account's ledger
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub transaction_type: TransactionType,
    pub amount: Decimal,
}

/// Aggregate expense total for one category in a period
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category_id: String,
    pub total: Decimal,
}

/// Database model for transactions
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub household_id: String,
    pub profile_id: String,
    pub account_id: String,
    pub category_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub date: String,
    pub note: Option<String>,
    pub transfer_to_account_id: Option<String>,
    pub recurring_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for partial updates
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct TransactionUpdateDB {
    pub amount: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
    pub updated_at: String,
}

impl TransactionDB {
    pub fn into_domain(self, category: Option<CategoryRef>) -> Result<Transaction> {
        let transaction_type = TransactionType::parse(&self.transaction_type)?;
        let amount: Decimal = self.amount.parse()?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            Error::Transaction(TransactionError::InvalidData(format!(
                "Bad date '{}': {}",
                self.date, e
            )))
        })?;

        Ok(Transaction {
            id: self.id,
            household_id: self.household_id,
            profile_id: self.profile_id,
            account_id: self.account_id,
            category_id: self.category_id,
            transaction_type,
            amount,
            date,
            note: self.note,
            transfer_to_account_id: self.transfer_to_account_id,
            recurring_id: self.recurring_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            category,
        })
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: domain.id.unwrap_or_default(),
            household_id: domain.household_id,
            profile_id: domain.profile_id,
            account_id: domain.account_id,
            category_id: domain.category_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            amount: domain.amount.to_string(),
            date: domain.date.format(DATE_FORMAT).to_string(),
            note: domain.note,
            transfer_to_account_id: domain.transfer_to_account_id,
            recurring_id: domain.recurring_id,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl From<TransactionUpdate> for TransactionUpdateDB {
    fn from(domain: TransactionUpdate) -> Self {
        Self {
            amount: domain.amount.map(|a| a.to_string()),
            date: domain.date.map(|d| d.format(DATE_FORMAT).to_string()),
            note: domain.note,
            category_id: domain.category_id,
            account_id: domain.account_id,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
