use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Expense,
    Income,
    Both,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Expense => "expense",
            CategoryType::Income => "income",
            CategoryType::Both => "both",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "expense" => Ok(CategoryType::Expense),
            "income" => Ok(CategoryType::Income),
            "both" => Ok(CategoryType::Both),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown category type '{}'",
                other
            )))),
        }
    }
}

/// Database model for categories; doubles as the domain model since all
/// fields map directly.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub household_id: Option<String>,
    pub parent_id: Option<String>,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub category_type: String,
    pub is_system: bool,
    pub sort_order: i32,
    pub created_at: String,
}

impl Category {
    pub fn is_parent(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn category_type(&self) -> Result<CategoryType> {
        CategoryType::parse(&self.category_type)
    }
}

/// Model for creating a new category
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub household_id: Option<String>,
    pub parent_id: Option<String>,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub category_type: String,
    pub is_system: bool,
    pub sort_order: i32,
    pub created_at: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }
        CategoryType::parse(&self.category_type)?;
        Ok(())
    }
}

/// Model for updating a category
#[derive(AsChangeset, Serialize, Deserialize, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::categories)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub category_type: Option<String>,
    pub sort_order: Option<i32>,
}

/// Category with its children (for hierarchical display)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}
