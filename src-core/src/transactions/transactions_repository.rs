use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::transactions_errors::TransactionError;
use super::transactions_model::{
    CategoryRef, CategorySpend, LedgerEntry, NewTransaction, Transaction, TransactionDB,
    TransactionFilter, TransactionType, TransactionUpdate, TransactionUpdateDB, DATE_FORMAT,
};
use super::transactions_traits::TransactionRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::{categories, transactions};

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }

    fn load_one(conn: &mut SqliteConnection, transaction_id: &str) -> Result<Transaction> {
        let row = transactions::table
            .find(transaction_id)
            .first::<TransactionDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => TransactionError::NotFound(format!(
                    "Transaction with id {} not found",
                    transaction_id
                )),
                _ => TransactionError::DatabaseError(e.to_string()),
            })?;

        let category = categories::table
            .find(&row.category_id)
            .select((
                categories::id,
                categories::name,
                categories::icon,
                categories::color,
            ))
            .first::<(String, String, Option<String>, Option<String>)>(conn)
            .optional()?
            .map(|(id, name, icon, color)| CategoryRef {
                id,
                name,
                icon,
                color,
            });

        row.into_domain(category)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transaction(&self, id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_one(&mut conn, id)
    }

    async fn search_transactions(&self, filter: TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .left_join(categories::table)
            .filter(transactions::household_id.eq(&filter.household_id))
            .into_boxed();

        if let Some(from_date) = filter.from_date {
            query = query.filter(transactions::date.ge(from_date.format(DATE_FORMAT).to_string()));
        }
        if let Some(to_date) = filter.to_date {
            query = query.filter(transactions::date.le(to_date.format(DATE_FORMAT).to_string()));
        }
        if let Some(account_id) = &filter.account_id {
            query = query.filter(
                transactions::account_id
                    .eq(account_id)
                    .or(transactions::transfer_to_account_id.eq(account_id)),
            );
        }
        if let Some(category_id) = &filter.category_id {
            query = query.filter(transactions::category_id.eq(category_id));
        }
        if let Some(transaction_type) = filter.transaction_type {
            query = query.filter(transactions::transaction_type.eq(transaction_type.as_str()));
        }

        let rows: Vec<(
            TransactionDB,
            Option<(String, String, Option<String>, Option<String>)>,
        )> = query
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .select((
                TransactionDB::as_select(),
                (
                    categories::id,
                    categories::name,
                    categories::icon,
                    categories::color,
                )
                    .nullable(),
            ))
            .load(&mut conn)?;

        rows.into_iter()
            .map(|(row, cat)| {
                let category = cat.map(|(id, name, icon, color)| CategoryRef {
                    id,
                    name,
                    icon,
                    color,
                });
                row.into_domain(category)
            })
            .collect()
    }

    fn account_ledger(
        &self,
        account_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .into_boxed();
        if let Some(cutoff) = as_of {
            query = query.filter(transactions::date.le(cutoff.format(DATE_FORMAT).to_string()));
        }

        let rows: Vec<(String, String)> = query
            .select((transactions::transaction_type, transactions::amount))
            .load(&mut conn)?;

        rows.into_iter()
            .map(|(type_str, amount_str)| {
                let transaction_type = TransactionType::parse(&type_str)?;
                let amount: Decimal = amount_str.parse()?;
                Ok(LedgerEntry {
                    transaction_type,
                    amount,
                })
            })
            .collect()
    }

    fn incoming_transfers(
        &self,
        account_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<Decimal>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::transfer_to_account_id.eq(account_id))
            .filter(transactions::transaction_type.eq(TransactionType::Transfer.as_str()))
            .into_boxed();
        if let Some(cutoff) = as_of {
            query = query.filter(transactions::date.le(cutoff.format(DATE_FORMAT).to_string()));
        }

        let rows: Vec<String> = query.select(transactions::amount).load(&mut conn)?;
        rows.into_iter()
            .map(|amount_str| Ok(amount_str.parse::<Decimal>()?))
            .collect()
    }

    async fn expenses_by_category(
        &self,
        household_id: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<CategorySpend>> {
        let mut conn = get_connection(&self.pool)?;

        // Amounts live in TEXT columns, so the exact-decimal sum happens here
        // rather than in SQL.
        let rows: Vec<(String, String)> = transactions::table
            .filter(transactions::household_id.eq(household_id))
            .filter(transactions::transaction_type.eq(TransactionType::Expense.as_str()))
            .filter(transactions::date.ge(from_date.format(DATE_FORMAT).to_string()))
            .filter(transactions::date.le(to_date.format(DATE_FORMAT).to_string()))
            .select((transactions::category_id, transactions::amount))
            .load(&mut conn)?;

        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for (category_id, amount_str) in rows {
            let amount: Decimal = amount_str.parse()?;
            *totals.entry(category_id).or_insert(Decimal::ZERO) += amount;
        }

        Ok(totals
            .into_iter()
            .map(|(category_id, total)| CategorySpend { category_id, total })
            .collect())
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let mut row: TransactionDB = new_transaction.into();
                if row.id.is_empty() {
                    row.id = Uuid::new_v4().to_string();
                }

                diesel::insert_into(transactions::table)
                    .values(&row)
                    .execute(conn)?;

                Self::load_one(conn, &row.id)
            })
            .await
    }

    async fn update_transaction(
        &self,
        id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let changes: TransactionUpdateDB = update.into();
                diesel::update(transactions::table.find(&id_owned))
                    .set(&changes)
                    .execute(conn)?;

                Self::load_one(conn, &id_owned)
            })
            .await
    }

    async fn delete_transaction(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected =
                    diesel::delete(transactions::table.find(&id_owned)).execute(conn)?;
                if affected == 0 {
                    return Err(TransactionError::NotFound(format!(
                        "Transaction with id {} not found",
                        id_owned
                    ))
                    .into());
                }
                Ok(affected)
            })
            .await
    }
}
