// Module declarations
pub(crate) mod transactions_errors;
pub(crate) mod transactions_model;
pub(crate) mod transactions_repository;
pub(crate) mod transactions_service;
pub(crate) mod transactions_traits;

#[cfg(test)]
mod transactions_repository_tests;

// Re-export the public interface
pub use transactions_errors::TransactionError;
pub use transactions_model::{
    month_bounds, CategoryRef, CategorySpend, LedgerEntry, NewTransaction, Transaction,
    TransactionDB, TransactionFilter, TransactionType, TransactionUpdate,
};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
