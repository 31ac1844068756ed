pub(crate) mod categories_model;
pub(crate) mod categories_repository;
pub(crate) mod categories_service;
pub(crate) mod categories_traits;

pub use categories_model::{
    Category, CategoryType, CategoryWithChildren, NewCategory, UpdateCategory,
};
pub use categories_repository::CategoryRepository;
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};

#[cfg(test)]
mod categories_repository_tests;
