pub(crate) mod recurring_model;
pub(crate) mod recurring_repository;
pub(crate) mod recurring_service;
pub(crate) mod recurring_traits;

pub use recurring_model::{
    NewRecurring, RecurringFrequency, RecurringTransaction, RecurringUpdate,
};
pub use recurring_repository::RecurringRepository;
pub use recurring_service::RecurringService;
pub use recurring_traits::{RecurringRepositoryTrait, RecurringServiceTrait};
