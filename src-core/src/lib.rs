pub mod db;

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod households;
pub mod recurring;
pub mod summary;
pub mod transactions;

pub mod constants;
pub mod context;
pub mod errors;
pub mod schema;

pub use context::ServiceContext;
pub use errors::{Error, Result};
