use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use super::accounts_errors::AccountError;
use super::accounts_model::{Account, AccountDB, AccountUpdate, AccountUpdateDB, NewAccount};
use super::accounts_traits::AccountRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::accounts;

/// Repository for managing account rows
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        AccountRepository { pool, writer }
    }

    fn find_account(conn: &mut SqliteConnection, account_id: &str) -> Result<Account> {
        let row = accounts::table
            .find(account_id)
            .first::<AccountDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    AccountError::NotFound(format!("Account with id {} not found", account_id))
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?;
        row.try_into()
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        Self::find_account(&mut conn, account_id)
    }

    fn list(&self, household_id: &str, active_only: bool) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table
            .filter(accounts::household_id.eq(household_id))
            .into_boxed();
        if active_only {
            query = query.filter(accounts::is_active.eq(true));
        }

        let rows = query
            .order((accounts::sort_order.asc(), accounts::name.asc()))
            .load::<AccountDB>(&mut conn)?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let mut row: AccountDB = new_account.into();
                if row.id.is_empty() {
                    row.id = Uuid::new_v4().to_string();
                }

                diesel::insert_into(accounts::table)
                    .values(&row)
                    .execute(conn)?;

                Self::find_account(conn, &row.id)
            })
            .await
    }

    async fn update(&self, account_id: &str, update: AccountUpdate) -> Result<Account> {
        let id_owned = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let changes: AccountUpdateDB = update.into();
                diesel::update(accounts::table.find(&id_owned))
                    .set(&changes)
                    .execute(conn)?;

                Self::find_account(conn, &id_owned)
            })
            .await
    }

    async fn delete(&self, account_id: &str) -> Result<usize> {
        let id_owned = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Foreign-key rejections (account still referenced by
                // transactions) propagate verbatim.
                let affected = diesel::delete(accounts::table.find(&id_owned)).execute(conn)?;
                if affected == 0 {
                    return Err(AccountError::NotFound(format!(
                        "Account with id {} not found",
                        id_owned
                    ))
                    .into());
                }
                Ok(affected)
            })
            .await
    }
}
