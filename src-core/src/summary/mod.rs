pub(crate) mod summary_model;
pub(crate) mod summary_service;
pub(crate) mod summary_traits;

pub use summary_model::{FinanceSummary, TopCategory};
pub use summary_service::FinanceSummaryService;
pub use summary_traits::FinanceSummaryServiceTrait;
