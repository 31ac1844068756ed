use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use super::categories_model::{Category, CategoryType, NewCategory, UpdateCategory};
use super::categories_traits::CategoryRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{Error, Result, ValidationError};
use crate::schema::{categories, transactions};

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_categories(&self, household_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(
                categories::household_id
                    .eq(household_id)
                    .or(categories::household_id.is_null()),
            )
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<Category>(&mut conn)?)
    }

    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .find(id)
            .first::<Category>(&mut conn)
            .optional()?)
    }

    fn get_categories_by_type(
        &self,
        household_id: &str,
        category_type: CategoryType,
    ) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(
                categories::household_id
                    .eq(household_id)
                    .or(categories::household_id.is_null()),
            )
            .filter(
                categories::category_type
                    .eq(category_type.as_str())
                    .or(categories::category_type.eq(CategoryType::Both.as_str())),
            )
            .order(categories::sort_order.asc())
            .load::<Category>(&mut conn)?)
    }

    fn has_transactions(&self, category_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = transactions::table
            .filter(transactions::category_id.eq(category_id))
            .count()
            .get_result(&mut conn)?;
        Ok(count > 0)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut category = new_category;
                if category.id.is_none() {
                    category.id = Some(Uuid::new_v4().to_string());
                }

                diesel::insert_into(categories::table)
                    .values(&category)
                    .execute(conn)?;

                Ok(categories::table
                    .find(category.id.unwrap_or_default())
                    .first::<Category>(conn)?)
            })
            .await
    }

    async fn update_category(&self, id: &str, update: UpdateCategory) -> Result<Category> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let existing: Category =
                    categories::table.find(&id_owned).first::<Category>(conn)?;
                if existing.is_system {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "System categories cannot be modified".to_string(),
                    )));
                }

                diesel::update(categories::table.find(&id_owned))
                    .set(&update)
                    .execute(conn)?;

                Ok(categories::table.find(&id_owned).first::<Category>(conn)?)
            })
            .await
    }

    async fn delete_category(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let existing: Category =
                    categories::table.find(&id_owned).first::<Category>(conn)?;
                if existing.is_system {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "System categories cannot be deleted".to_string(),
                    )));
                }

                // Child categories go with their parent. A category that
                // still has transactions fails the foreign key here; the
                // service checks first to return a friendlier error.
                let deleted = diesel::delete(
                    categories::table.filter(
                        categories::id
                            .eq(&id_owned)
                            .or(categories::parent_id.eq(&id_owned)),
                    ),
                )
                .execute(conn)?;

                Ok(deleted)
            })
            .await
    }
}
