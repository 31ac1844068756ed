use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ALERT_THRESHOLD;
use crate::errors::{Error, Result, ValidationError};

/// Domain model for a spending ceiling: one category, one household, one
/// (year, month) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub household_id: String,
    pub category_id: String,
    pub year: i32,
    pub month: i32,
    pub amount: Decimal,
    pub alert_threshold: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Budget joined with its category's display metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithCategory {
    #[serde(flatten)]
    pub budget: Budget,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
}

impl BudgetWithCategory {
    /// Whether actual spend has reached the alert threshold of the ceiling.
    pub fn is_over_threshold(&self, spent: Decimal) -> bool {
        if self.budget.amount <= Decimal::ZERO {
            return false;
        }
        let percent_used = spent / self.budget.amount * Decimal::ONE_HUNDRED;
        percent_used >= Decimal::from(self.budget.alert_threshold)
    }
}

/// Upsert input keyed on the natural key (household, category, year, month)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpsert {
    pub household_id: String,
    pub category_id: String,
    pub year: i32,
    pub month: i32,
    pub amount: Decimal,
    pub alert_threshold: Option<i32>,
}

/// Sanity bounds for budget periods; keeps typos like 225 or 20255 out of
/// the natural key.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

impl BudgetUpsert {
    pub fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.month) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Month must be between 1 and 12, got {}",
                self.month
            ))));
        }
        if !YEAR_RANGE.contains(&self.year) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Year {} is out of range",
                self.year
            ))));
        }
        if self.amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget amount cannot be negative".to_string(),
            )));
        }
        if let Some(threshold) = self.alert_threshold {
            if !(0..=100).contains(&threshold) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Alert threshold must be between 0 and 100, got {}",
                    threshold
                ))));
            }
        }
        Ok(())
    }
}

/// Partial update: only the provided fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub amount: Option<Decimal>,
    pub alert_threshold: Option<i32>,
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            if amount < Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Budget amount cannot be negative".to_string(),
                )));
            }
        }
        if let Some(threshold) = self.alert_threshold {
            if !(0..=100).contains(&threshold) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Alert threshold must be between 0 and 100, got {}",
                    threshold
                ))));
            }
        }
        Ok(())
    }
}

/// Database model for budgets
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub household_id: String,
    pub category_id: String,
    pub year: i32,
    pub month: i32,
    pub amount: String,
    pub alert_threshold: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for partial updates
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct BudgetUpdateDB {
    pub amount: Option<String>,
    pub alert_threshold: Option<i32>,
    pub updated_at: String,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self> {
        let amount: Decimal = db.amount.parse()?;
        Ok(Budget {
            id: db.id,
            household_id: db.household_id,
            category_id: db.category_id,
            year: db.year,
            month: db.month,
            amount,
            alert_threshold: db.alert_threshold,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<BudgetUpsert> for BudgetDB {
    fn from(domain: BudgetUpsert) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: String::new(),
            household_id: domain.household_id,
            category_id: domain.category_id,
            year: domain.year,
            month: domain.month,
            amount: domain.amount.to_string(),
            alert_threshold: domain.alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl From<BudgetUpdate> for BudgetUpdateDB {
    fn from(domain: BudgetUpdate) -> Self {
        Self {
            amount: domain.amount.map(|a| a.to_string()),
            alert_threshold: domain.alert_threshold,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
