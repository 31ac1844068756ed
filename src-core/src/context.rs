use std::sync::Arc;

use log::info;

use crate::accounts::{AccountRepository, AccountService, AccountServiceTrait};
use crate::budgets::{BudgetRepository, BudgetService, BudgetServiceTrait};
use crate::categories::{CategoryRepository, CategoryService, CategoryServiceTrait};
use crate::db::{self, DbPool, WriteHandle};
use crate::errors::Result;
use crate::households::{HouseholdRepository, HouseholdService, HouseholdServiceTrait};
use crate::recurring::{RecurringRepository, RecurringService, RecurringServiceTrait};
use crate::summary::{FinanceSummaryService, FinanceSummaryServiceTrait};
use crate::transactions::{TransactionRepository, TransactionService, TransactionServiceTrait};

/// Wires the pool, the write actor and every service behind trait objects.
/// Embedding hosts construct one of these at startup and clone the Arcs they
/// need.
pub struct ServiceContext {
    pub db_path: String,
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    pub household_service: Arc<dyn HouseholdServiceTrait>,
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub recurring_service: Arc<dyn RecurringServiceTrait>,
    pub summary_service: Arc<dyn FinanceSummaryServiceTrait>,
}

impl ServiceContext {
    pub fn new(app_data_dir: &str) -> Result<Self> {
        info!("Initializing service context");

        let db_path = db::init(app_data_dir)?;
        let pool = db::create_pool(&db_path)?;
        db::run_migrations(&pool)?;
        let writer = WriteHandle::spawn(&db_path)?;

        let household_repository =
            Arc::new(HouseholdRepository::new(pool.clone(), writer.clone()));
        let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
        let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
        let transaction_repository =
            Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
        let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
        let recurring_repository =
            Arc::new(RecurringRepository::new(pool.clone(), writer.clone()));

        let household_service = Arc::new(HouseholdService::new(household_repository));
        let account_service = Arc::new(AccountService::new(
            account_repository,
            transaction_repository.clone(),
        ));
        let category_service = Arc::new(CategoryService::new(category_repository));
        let transaction_service =
            Arc::new(TransactionService::new(transaction_repository.clone()));
        let budget_service = Arc::new(BudgetService::new(budget_repository.clone()));
        let recurring_service = Arc::new(RecurringService::new(
            recurring_repository,
            transaction_repository.clone(),
        ));
        let summary_service = Arc::new(FinanceSummaryService::new(
            transaction_repository,
            budget_repository,
        ));

        Ok(ServiceContext {
            db_path,
            pool,
            writer,
            household_service,
            account_service,
            category_service,
            transaction_service,
            budget_service,
            recurring_service,
            summary_service,
        })
    }
}
