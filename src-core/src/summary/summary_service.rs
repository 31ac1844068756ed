use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;

use super::summary_model::{FinanceSummary, TopCategory};
use super::summary_traits::FinanceSummaryServiceTrait;
use crate::budgets::BudgetRepositoryTrait;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, TOP_CATEGORIES_LIMIT, UNCATEGORIZED_LABEL};
use crate::errors::Result;
use crate::transactions::{
    month_bounds, Transaction, TransactionFilter, TransactionRepositoryTrait, TransactionType,
};

/// Computes the monthly finance snapshot for the dashboard
pub struct FinanceSummaryService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl FinanceSummaryService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
    ) -> Self {
        FinanceSummaryService {
            transaction_repository,
            budget_repository,
        }
    }

    fn percent(part: Decimal, whole: Decimal) -> Decimal {
        if whole == Decimal::ZERO {
            return Decimal::ZERO;
        }
        (part / whole * Decimal::ONE_HUNDRED).round_dp(DISPLAY_DECIMAL_PRECISION)
    }

    fn delta_percent(current: Decimal, previous: Decimal) -> Decimal {
        if previous == Decimal::ZERO {
            return Decimal::ZERO;
        }
        ((current - previous) / previous * Decimal::ONE_HUNDRED)
            .round_dp(DISPLAY_DECIMAL_PRECISION)
    }

    /// Resolves category ids to display names using the month's transactions;
    /// the first transaction carrying the category wins.
    fn resolve_category_name(transactions: &[Transaction], category_id: &str) -> String {
        transactions
            .iter()
            .filter_map(|t| t.category.as_ref())
            .find(|c| c.id == category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string())
    }
}

#[async_trait]
impl FinanceSummaryServiceTrait for FinanceSummaryService {
    async fn get_summary(
        &self,
        household_id: &str,
        year: i32,
        month: u32,
    ) -> Result<FinanceSummary> {
        let (first_day, last_day) = month_bounds(year, month)?;

        let filter = TransactionFilter {
            household_id: household_id.to_string(),
            from_date: Some(first_day),
            to_date: Some(last_day),
            ..Default::default()
        };

        let (transactions, budgets, spends) = tokio::join!(
            self.transaction_repository.search_transactions(filter),
            self.budget_repository
                .get_budgets(household_id, year, month as i32),
            self.transaction_repository
                .expenses_by_category(household_id, first_day, last_day),
        );

        // Without transactions there is nothing to summarize; budgets and
        // grouped spends only degrade the budget figures.
        let transactions = transactions?;
        let budgets = budgets.unwrap_or_else(|e| {
            warn!("Budget fetch failed for {}: {}", household_id, e);
            Vec::new()
        });
        let spends = spends.unwrap_or_else(|e| {
            warn!("Expense grouping failed for {}: {}", household_id, e);
            Vec::new()
        });

        let mut total_income = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        for transaction in &transactions {
            match transaction.transaction_type {
                TransactionType::Income => total_income += transaction.amount,
                TransactionType::Expense => total_expenses += transaction.amount,
                TransactionType::Transfer => {}
            }
        }
        let balance = total_income - total_expenses;
        let savings_rate = Self::percent(balance, total_income);

        let total_budget: Decimal = budgets.iter().map(|b| b.budget.amount).sum();
        let total_spent: Decimal = spends.iter().map(|s| s.total).sum();
        let budget_used_percent = Self::percent(total_spent, total_budget);

        let mut top_categories: Vec<TopCategory> = spends
            .iter()
            .map(|spend| TopCategory {
                category_id: spend.category_id.clone(),
                category_name: Self::resolve_category_name(&transactions, &spend.category_id),
                value: spend.total,
            })
            .collect();
        top_categories.sort_by(|a, b| b.value.cmp(&a.value));
        top_categories.truncate(TOP_CATEGORIES_LIMIT);

        Ok(FinanceSummary {
            year,
            month,
            total_income,
            total_expenses,
            balance,
            savings_rate,
            total_budget,
            total_spent,
            budget_used_percent,
            top_categories,
            income_vs_last_month: None,
            expenses_vs_last_month: None,
        })
    }

    async fn get_summary_with_comparison(
        &self,
        household_id: &str,
        year: i32,
        month: u32,
    ) -> Result<FinanceSummary> {
        let mut current = self.get_summary(household_id, year, month).await?;

        let (previous_year, previous_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };

        match self
            .get_summary(household_id, previous_year, previous_month)
            .await
        {
            Ok(previous) => {
                current.income_vs_last_month = Some(Self::delta_percent(
                    current.total_income,
                    previous.total_income,
                ));
                current.expenses_vs_last_month = Some(Self::delta_percent(
                    current.total_expenses,
                    previous.total_expenses,
                ));
            }
            Err(e) => {
                // The current month is still worth showing.
                warn!(
                    "Previous-month summary failed for {} {}-{:02}: {}",
                    household_id, previous_year, previous_month, e
                );
            }
        }

        Ok(current)
    }
}
