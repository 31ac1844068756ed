use std::sync::Arc;

use diesel::prelude::*;
use tempfile::TempDir;

use crate::db::{self, DbPool, WriteHandle};
use crate::schema::{accounts, categories, households, profiles};

/// On-disk SQLite database with migrations applied, pool and write actor
/// wired the same way `ServiceContext` does it.
pub(crate) struct TestDb {
    _dir: TempDir,
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let db_path = db::init(dir.path().to_str().expect("utf-8 temp path")).expect("init db");
        let pool = db::create_pool(&db_path).expect("create pool");
        db::run_migrations(&pool).expect("run migrations");
        let writer = WriteHandle::spawn(&db_path).expect("spawn writer");
        TestDb {
            _dir: dir,
            pool,
            writer,
        }
    }

    pub fn seed_household(&self, id: &str) {
        let mut conn = db::get_connection(&self.pool).unwrap();
        diesel::insert_into(households::table)
            .values((
                households::id.eq(id),
                households::name.eq(format!("Household {}", id)),
                households::invite_code.eq(format!("CODE{}", id.to_uppercase())),
                households::created_at.eq("2025-01-01T00:00:00Z"),
            ))
            .execute(&mut conn)
            .unwrap();
    }

    pub fn seed_profile(&self, id: &str, household_id: &str) {
        let mut conn = db::get_connection(&self.pool).unwrap();
        diesel::insert_into(profiles::table)
            .values((
                profiles::id.eq(id),
                profiles::household_id.eq(household_id),
                profiles::display_name.eq(format!("Profile {}", id)),
                profiles::role.eq("member"),
                profiles::created_at.eq("2025-01-01T00:00:00Z"),
            ))
            .execute(&mut conn)
            .unwrap();
    }

    pub fn seed_category(&self, id: &str, household_id: &str, name: &str) {
        let mut conn = db::get_connection(&self.pool).unwrap();
        diesel::insert_into(categories::table)
            .values((
                categories::id.eq(id),
                categories::household_id.eq(household_id),
                categories::name.eq(name),
                categories::category_type.eq("both"),
                categories::is_system.eq(false),
                categories::sort_order.eq(0),
                categories::created_at.eq("2025-01-01T00:00:00Z"),
            ))
            .execute(&mut conn)
            .unwrap();
    }

    pub fn seed_account(&self, id: &str, household_id: &str, initial_balance: &str) {
        let mut conn = db::get_connection(&self.pool).unwrap();
        diesel::insert_into(accounts::table)
            .values((
                accounts::id.eq(id),
                accounts::household_id.eq(household_id),
                accounts::name.eq(format!("Account {}", id)),
                accounts::account_type.eq("bank"),
                accounts::currency.eq("CLP"),
                accounts::initial_balance.eq(initial_balance),
                accounts::is_active.eq(true),
                accounts::sort_order.eq(0),
                accounts::created_at.eq("2025-01-01T00:00:00Z"),
                accounts::updated_at.eq("2025-01-01T00:00:00Z"),
            ))
            .execute(&mut conn)
            .unwrap();
    }
}
