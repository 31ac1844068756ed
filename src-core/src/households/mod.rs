pub(crate) mod households_model;
pub(crate) mod households_repository;
pub(crate) mod households_service;
pub(crate) mod households_traits;

pub use households_model::{Household, NewHousehold, Profile, ProfileRole};
pub use households_repository::HouseholdRepository;
pub use households_service::HouseholdService;
pub use households_traits::{HouseholdRepositoryTrait, HouseholdServiceTrait};
