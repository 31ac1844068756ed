use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use super::budgets_model::{
    Budget, BudgetDB, BudgetUpdate, BudgetUpdateDB, BudgetUpsert, BudgetWithCategory,
};
use super::budgets_traits::BudgetRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{Error, Result};
use crate::schema::{budgets, categories};

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget(&self, id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .find(id)
            .first::<BudgetDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Budget with id {} not found", id))
                }
                _ => e.into(),
            })?;
        row.try_into()
    }

    async fn get_budgets(
        &self,
        household_id: &str,
        year: i32,
        month: i32,
    ) -> Result<Vec<BudgetWithCategory>> {
        let mut conn = get_connection(&self.pool)?;

        let rows: Vec<(BudgetDB, String, Option<String>, Option<String>)> = budgets::table
            .inner_join(categories::table)
            .filter(budgets::household_id.eq(household_id))
            .filter(budgets::year.eq(year))
            .filter(budgets::month.eq(month))
            .select((
                BudgetDB::as_select(),
                categories::name,
                categories::icon,
                categories::color,
            ))
            .load(&mut conn)?;

        rows.into_iter()
            .map(|(row, name, icon, color)| {
                Ok(BudgetWithCategory {
                    budget: row.try_into()?,
                    category_name: name,
                    category_icon: icon,
                    category_color: color,
                })
            })
            .collect()
    }

    async fn upsert_budget(&self, upsert: BudgetUpsert) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let mut row: BudgetDB = upsert.into();
                row.id = Uuid::new_v4().to_string();

                // One conditional write on the natural key. The UNIQUE
                // constraint makes concurrent upserts converge on one row.
                diesel::insert_into(budgets::table)
                    .values(&row)
                    .on_conflict((
                        budgets::household_id,
                        budgets::category_id,
                        budgets::year,
                        budgets::month,
                    ))
                    .do_update()
                    .set((
                        budgets::amount.eq(&row.amount),
                        budgets::alert_threshold.eq(row.alert_threshold),
                        budgets::updated_at.eq(&row.updated_at),
                    ))
                    .execute(conn)?;

                let stored = budgets::table
                    .filter(budgets::household_id.eq(&row.household_id))
                    .filter(budgets::category_id.eq(&row.category_id))
                    .filter(budgets::year.eq(row.year))
                    .filter(budgets::month.eq(row.month))
                    .first::<BudgetDB>(conn)?;

                stored.try_into()
            })
            .await
    }

    async fn update_budget(&self, id: &str, update: BudgetUpdate) -> Result<Budget> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let changes: BudgetUpdateDB = update.into();
                diesel::update(budgets::table.find(&id_owned))
                    .set(&changes)
                    .execute(conn)?;

                let stored = budgets::table.find(&id_owned).first::<BudgetDB>(conn)?;
                stored.try_into()
            })
            .await
    }

    async fn delete_budget(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(budgets::table.find(&id_owned)).execute(conn)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Budget with id {} not found",
                        id_owned
                    )));
                }
                Ok(affected)
            })
            .await
    }
}
