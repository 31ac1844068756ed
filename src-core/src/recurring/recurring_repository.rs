use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use super::recurring_model::{
    NewRecurring, RecurringTransaction, RecurringTransactionDB, RecurringUpdate, RecurringUpdateDB,
};
use super::recurring_traits::RecurringRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{Error, Result};
use crate::schema::recurring_transactions;

pub struct RecurringRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RecurringRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RecurringRepository { pool, writer }
    }

    fn load_one(conn: &mut SqliteConnection, id: &str) -> Result<RecurringTransaction> {
        recurring_transactions::table
            .find(id)
            .first::<RecurringTransactionDB>(conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Recurring transaction '{}' not found", id)))?
            .into_domain()
    }
}

#[async_trait]
impl RecurringRepositoryTrait for RecurringRepository {
    fn get_recurring(&self, id: &str) -> Result<RecurringTransaction> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_one(&mut conn, id)
    }

    fn list_recurring(
        &self,
        household_id: &str,
        active_only: bool,
    ) -> Result<Vec<RecurringTransaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = recurring_transactions::table
            .filter(recurring_transactions::household_id.eq(household_id))
            .into_boxed();
        if active_only {
            query = query.filter(recurring_transactions::is_active.eq(true));
        }

        let rows: Vec<RecurringTransactionDB> = query
            .order(recurring_transactions::next_due_date.asc())
            .load(&mut conn)?;

        rows.into_iter().map(|row| row.into_domain()).collect()
    }

    async fn create_recurring(&self, new_recurring: NewRecurring) -> Result<RecurringTransaction> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<RecurringTransaction> {
                    let mut row: RecurringTransactionDB = new_recurring.into();
                    if row.id.is_empty() {
                        row.id = Uuid::new_v4().to_string();
                    }

                    diesel::insert_into(recurring_transactions::table)
                        .values(&row)
                        .execute(conn)?;

                    Self::load_one(conn, &row.id)
                },
            )
            .await
    }

    async fn update_recurring(
        &self,
        id: &str,
        update: RecurringUpdate,
    ) -> Result<RecurringTransaction> {
        let id_owned = id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<RecurringTransaction> {
                    let changes: RecurringUpdateDB = update.into();
                    diesel::update(recurring_transactions::table.find(&id_owned))
                        .set(&changes)
                        .execute(conn)?;

                    Self::load_one(conn, &id_owned)
                },
            )
            .await
    }

    async fn delete_recurring(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(recurring_transactions::table.find(&id_owned))
                    .execute(conn)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!(
                        "Recurring transaction '{}' not found",
                        id_owned
                    )));
                }
                Ok(affected)
            })
            .await
    }
}
