use async_trait::async_trait;

use super::households_model::{Household, Profile};
use crate::errors::Result;

/// Trait defining the contract for Household repository operations.
#[async_trait]
pub trait HouseholdRepositoryTrait: Send + Sync {
    fn get_household(&self, id: &str) -> Result<Household>;
    fn get_members(&self, household_id: &str) -> Result<Vec<Profile>>;
    async fn create_household(&self, name: String, profile_id: String) -> Result<Household>;
    async fn join_with_code(&self, code: String, profile_id: String) -> Result<Household>;
}

/// Trait defining the contract for Household service operations.
#[async_trait]
pub trait HouseholdServiceTrait: Send + Sync {
    fn get_household(&self, id: &str) -> Result<Household>;
    fn get_members(&self, household_id: &str) -> Result<Vec<Profile>>;
    async fn create_household(&self, name: String, profile_id: String) -> Result<Household>;
    async fn join_with_code(&self, code: String, profile_id: String) -> Result<Household>;
}
