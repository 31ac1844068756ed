// Module declarations
pub(crate) mod budgets_model;
pub(crate) mod budgets_repository;
pub(crate) mod budgets_service;
pub(crate) mod budgets_traits;


#[cfg(test)]
mod budgets_repository_tests;

// Re-export the public interface
pub use budgets_model::{Budget, BudgetDB, BudgetUpdate, BudgetUpsert, BudgetWithCategory};
pub use budgets_repository::BudgetRepository;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
