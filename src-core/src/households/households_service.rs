use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::households_model::{Household, NewHousehold, Profile};
use super::households_traits::{HouseholdRepositoryTrait, HouseholdServiceTrait};
use crate::errors::Result;

/// Service for household membership management
pub struct HouseholdService {
    repository: Arc<dyn HouseholdRepositoryTrait>,
}

impl HouseholdService {
    pub fn new(repository: Arc<dyn HouseholdRepositoryTrait>) -> Self {
        HouseholdService { repository }
    }
}

#[async_trait]
impl HouseholdServiceTrait for HouseholdService {
    fn get_household(&self, id: &str) -> Result<Household> {
        self.repository.get_household(id)
    }

    fn get_members(&self, household_id: &str) -> Result<Vec<Profile>> {
        self.repository.get_members(household_id)
    }

    async fn create_household(&self, name: String, profile_id: String) -> Result<Household> {
        NewHousehold { name: name.clone() }.validate()?;
        debug!("Creating household '{}' for profile {}", name, profile_id);
        self.repository.create_household(name, profile_id).await
    }

    async fn join_with_code(&self, code: String, profile_id: String) -> Result<Household> {
        debug!("Profile {} joining household by invite code", profile_id);
        self.repository.join_with_code(code, profile_id).await
    }
}
