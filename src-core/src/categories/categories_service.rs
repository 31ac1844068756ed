use std::sync::Arc;

use async_trait::async_trait;

use super::categories_model::{
    Category, CategoryType, CategoryWithChildren, NewCategory, UpdateCategory,
};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for managing income/expense categories
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self, household_id: &str) -> Result<Vec<Category>> {
        self.repository.get_categories(household_id)
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        self.repository.get_category_by_id(id)
    }

    fn list_with_children(&self, household_id: &str) -> Result<Vec<CategoryWithChildren>> {
        let all = self.repository.get_categories(household_id)?;

        let (parents, children): (Vec<Category>, Vec<Category>) =
            all.into_iter().partition(Category::is_parent);

        Ok(parents
            .into_iter()
            .map(|parent| {
                let own_children = children
                    .iter()
                    .filter(|c| c.parent_id.as_deref() == Some(parent.id.as_str()))
                    .cloned()
                    .collect();
                CategoryWithChildren {
                    category: parent,
                    children: own_children,
                }
            })
            .collect())
    }

    fn get_categories_by_type(
        &self,
        household_id: &str,
        category_type: CategoryType,
    ) -> Result<Vec<Category>> {
        self.repository
            .get_categories_by_type(household_id, category_type)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        self.repository.create_category(new_category).await
    }

    async fn update_category(&self, id: &str, update: UpdateCategory) -> Result<Category> {
        self.repository.update_category(id, update).await
    }

    async fn delete_category(&self, id: &str) -> Result<usize> {
        if self.repository.has_transactions(id)? {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Cannot delete a category while transactions reference it".to_string(),
            )));
        }
        self.repository.delete_category(id).await
    }
}
