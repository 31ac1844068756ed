use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the highest-spending categories of the month, resolved to a
/// display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCategory {
    pub category_id: String,
    pub category_name: String,
    pub value: Decimal,
}

/// Immutable snapshot of a household's finances for one calendar month.
/// Computed on demand; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    /// Percent of income kept; 0 when there is no income.
    pub savings_rate: Decimal,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    /// Percent of the combined budget consumed; 0 when nothing is budgeted.
    pub budget_used_percent: Decimal,
    pub top_categories: Vec<TopCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_vs_last_month: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses_vs_last_month: Option<Decimal>,
}
