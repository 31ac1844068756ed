use async_trait::async_trait;

use super::categories_model::{Category, CategoryType, CategoryWithChildren, NewCategory, UpdateCategory};
use crate::errors::Result;

/// Trait defining the contract for Category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Household-visible categories: the household's own plus system ones.
    fn get_categories(&self, household_id: &str) -> Result<Vec<Category>>;
    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>>;
    fn get_categories_by_type(
        &self,
        household_id: &str,
        category_type: CategoryType,
    ) -> Result<Vec<Category>>;
    fn has_transactions(&self, category_id: &str) -> Result<bool>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(&self, id: &str, update: UpdateCategory) -> Result<Category>;
    async fn delete_category(&self, id: &str) -> Result<usize>;
}

/// Trait defining the contract for Category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self, household_id: &str) -> Result<Vec<Category>>;
    fn get_category(&self, id: &str) -> Result<Option<Category>>;
    fn list_with_children(&self, household_id: &str) -> Result<Vec<CategoryWithChildren>>;
    fn get_categories_by_type(
        &self,
        household_id: &str,
        category_type: CategoryType,
    ) -> Result<Vec<Category>>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(&self, id: &str, update: UpdateCategory) -> Result<Category>;
    async fn delete_category(&self, id: &str) -> Result<usize>;
}
