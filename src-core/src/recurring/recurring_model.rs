use chrono::{Datelike, Duration, Months, NaiveDate};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::transactions::TransactionType;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl RecurringFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringFrequency::Weekly => "weekly",
            RecurringFrequency::Biweekly => "biweekly",
            RecurringFrequency::Monthly => "monthly",
            RecurringFrequency::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "weekly" => Ok(RecurringFrequency::Weekly),
            "biweekly" => Ok(RecurringFrequency::Biweekly),
            "monthly" => Ok(RecurringFrequency::Monthly),
            "yearly" => Ok(RecurringFrequency::Yearly),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown recurring frequency '{}'",
                other
            )))),
        }
    }
}

/// Domain model for a recurring transaction template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: String,
    pub household_id: String,
    pub profile_id: String,
    pub account_id: String,
    pub category_id: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub frequency: RecurringFrequency,
    pub day_of_month: Option<i32>,
    pub next_due_date: NaiveDate,
    pub is_active: bool,
    pub auto_create: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for a new recurring template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurring {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub household_id: String,
    pub profile_id: String,
    pub account_id: String,
    pub category_id: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub frequency: RecurringFrequency,
    pub day_of_month: Option<i32>,
    pub next_due_date: NaiveDate,
    pub auto_create: bool,
}

impl NewRecurring {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Amount must be greater than zero".to_string(),
            )));
        }
        if self.transaction_type == TransactionType::Transfer {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Recurring templates cover income and expenses only".to_string(),
            )));
        }
        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Day of month {} is out of range",
                    day
                ))));
            }
        }
        Ok(())
    }
}

/// Partial update: only the provided fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringUpdate {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub frequency: Option<RecurringFrequency>,
    pub day_of_month: Option<i32>,
    pub next_due_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub auto_create: Option<bool>,
}

impl RecurringUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Amount must be greater than zero".to_string(),
                )));
            }
        }
        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Day of month {} is out of range",
                    day
                ))));
            }
        }
        Ok(())
    }
}

/// Next occurrence after one period. Month-based periods clamp to the length
/// of the target month; a preferred day of month is restored when the target
/// month allows it (due the 31st, February yields the 28th, March the 31st
/// again).
pub(crate) fn advance_due_date(
    current: NaiveDate,
    frequency: RecurringFrequency,
    day_of_month: Option<i32>,
) -> Result<NaiveDate> {
    let advanced = match frequency {
        RecurringFrequency::Weekly => Some(current + Duration::days(7)),
        RecurringFrequency::Biweekly => Some(current + Duration::days(14)),
        RecurringFrequency::Monthly => current.checked_add_months(Months::new(1)),
        RecurringFrequency::Yearly => current.checked_add_months(Months::new(12)),
    }
    .ok_or_else(|| {
        Error::Validation(ValidationError::InvalidDate(format!(
            "Cannot advance past {}",
            current
        )))
    })?;

    match (frequency, day_of_month) {
        (RecurringFrequency::Monthly | RecurringFrequency::Yearly, Some(day)) => {
            Ok(restore_preferred_day(advanced, day as u32))
        }
        _ => Ok(advanced),
    }
}

fn restore_preferred_day(date: NaiveDate, preferred: u32) -> NaiveDate {
    for day in (1..=preferred).rev() {
        if let Some(restored) = date.with_day(day) {
            return restored;
        }
    }
    date
}

/// Database model for recurring templates
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::recurring_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecurringTransactionDB {
    pub id: String,
    pub household_id: String,
    pub profile_id: String,
    pub account_id: String,
    pub category_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub description: Option<String>,
    pub frequency: String,
    pub day_of_month: Option<i32>,
    pub next_due_date: String,
    pub is_active: bool,
    pub auto_create: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Changeset for partial updates
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::recurring_transactions)]
pub struct RecurringUpdateDB {
    pub amount: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub day_of_month: Option<i32>,
    pub next_due_date: Option<String>,
    pub is_active: Option<bool>,
    pub auto_create: Option<bool>,
    pub updated_at: String,
}

impl RecurringTransactionDB {
    pub fn into_domain(self) -> Result<RecurringTransaction> {
        let transaction_type = TransactionType::parse(&self.transaction_type)?;
        let frequency = RecurringFrequency::parse(&self.frequency)?;
        let amount: Decimal = self.amount.parse()?;
        let next_due_date =
            NaiveDate::parse_from_str(&self.next_due_date, DATE_FORMAT).map_err(|e| {
                Error::Validation(ValidationError::InvalidDate(format!(
                    "Bad date '{}': {}",
                    self.next_due_date, e
                )))
            })?;

        Ok(RecurringTransaction {
            id: self.id,
            household_id: self.household_id,
            profile_id: self.profile_id,
            account_id: self.account_id,
            category_id: self.category_id,
            transaction_type,
            amount,
            description: self.description,
            frequency,
            day_of_month: self.day_of_month,
            next_due_date,
            is_active: self.is_active,
            auto_create: self.auto_create,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<NewRecurring> for RecurringTransactionDB {
    fn from(domain: NewRecurring) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: domain.id.unwrap_or_default(),
            household_id: domain.household_id,
            profile_id: domain.profile_id,
            account_id: domain.account_id,
            category_id: domain.category_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            amount: domain.amount.to_string(),
            description: domain.description,
            frequency: domain.frequency.as_str().to_string(),
            day_of_month: domain.day_of_month,
            next_due_date: domain.next_due_date.format(DATE_FORMAT).to_string(),
            is_active: true,
            auto_create: domain.auto_create,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl From<RecurringUpdate> for RecurringUpdateDB {
    fn from(domain: RecurringUpdate) -> Self {
        Self {
            amount: domain.amount.map(|a| a.to_string()),
            description: domain.description,
            frequency: domain.frequency.map(|f| f.as_str().to_string()),
            day_of_month: domain.day_of_month,
            next_due_date: domain.next_due_date.map(|d| d.format(DATE_FORMAT).to_string()),
            is_active: domain.is_active,
            auto_create: domain.auto_create,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn weekly_and_biweekly_add_whole_weeks() {
        let due = date(2025, 3, 28);
        assert_eq!(
            advance_due_date(due, RecurringFrequency::Weekly, None).unwrap(),
            date(2025, 4, 4)
        );
        assert_eq!(
            advance_due_date(due, RecurringFrequency::Biweekly, None).unwrap(),
            date(2025, 4, 11)
        );
    }

    #[test]
    fn monthly_clamps_to_short_months_and_recovers() {
        // Due the 31st: February has no 31st, so clamp, then recover in March.
        let feb = advance_due_date(date(2025, 1, 31), RecurringFrequency::Monthly, Some(31))
            .unwrap();
        assert_eq!(feb, date(2025, 2, 28));

        let march = advance_due_date(feb, RecurringFrequency::Monthly, Some(31)).unwrap();
        assert_eq!(march, date(2025, 3, 31));
    }

    #[test]
    fn monthly_in_a_leap_year_reaches_february_29() {
        let feb = advance_due_date(date(2024, 1, 31), RecurringFrequency::Monthly, Some(31))
            .unwrap();
        assert_eq!(feb, date(2024, 2, 29));
    }

    #[test]
    fn yearly_from_leap_day_lands_on_the_28th() {
        let next = advance_due_date(date(2024, 2, 29), RecurringFrequency::Yearly, None).unwrap();
        assert_eq!(next, date(2025, 2, 28));
    }

    #[test]
    fn transfers_cannot_recur() {
        let template = NewRecurring {
            id: None,
            household_id: "h1".to_string(),
            profile_id: "p1".to_string(),
            account_id: "a1".to_string(),
            category_id: "c1".to_string(),
            transaction_type: TransactionType::Transfer,
            amount: dec!(1000),
            description: None,
            frequency: RecurringFrequency::Monthly,
            day_of_month: Some(1),
            next_due_date: date(2025, 4, 1),
            auto_create: false,
        };
        assert!(template.validate().is_err());
    }

    #[test]
    fn day_of_month_must_be_in_range() {
        let mut template = NewRecurring {
            id: None,
            household_id: "h1".to_string(),
            profile_id: "p1".to_string(),
            account_id: "a1".to_string(),
            category_id: "c1".to_string(),
            transaction_type: TransactionType::Expense,
            amount: dec!(1000),
            description: None,
            frequency: RecurringFrequency::Monthly,
            day_of_month: Some(32),
            next_due_date: date(2025, 4, 1),
            auto_create: false,
        };
        assert!(template.validate().is_err());
        template.day_of_month = Some(0);
        assert!(template.validate().is_err());
        template.day_of_month = Some(15);
        assert!(template.validate().is_ok());
    }
}
