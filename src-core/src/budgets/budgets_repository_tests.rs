use std::sync::Arc;

use diesel::prelude::*;
use rust_decimal_macros::dec;

use super::budgets_model::{BudgetUpdate, BudgetUpsert};
use super::budgets_repository::BudgetRepository;
use super::budgets_traits::BudgetRepositoryTrait;
use crate::db::test_fixtures::TestDb;
use crate::db::{self};
use crate::errors::Error;
use crate::schema::budgets;

fn setup() -> (TestDb, BudgetRepository) {
    let test_db = TestDb::new();
    test_db.seed_household("h1");
    test_db.seed_category("c1", "h1", "Groceries");
    test_db.seed_category("c2", "h1", "Transport");
    let repository = BudgetRepository::new(test_db.pool.clone(), test_db.writer.clone());
    (test_db, repository)
}

fn upsert(category_id: &str, amount: rust_decimal::Decimal) -> BudgetUpsert {
    BudgetUpsert {
        household_id: "h1".to_string(),
        category_id: category_id.to_string(),
        year: 2025,
        month: 3,
        amount,
        alert_threshold: None,
    }
}

fn count_rows(test_db: &TestDb) -> i64 {
    let mut conn = db::get_connection(&test_db.pool).unwrap();
    budgets::table.count().get_result(&mut conn).unwrap()
}

#[tokio::test]
async fn upsert_is_idempotent_on_the_natural_key() {
    let (test_db, repository) = setup();

    let first = repository.upsert_budget(upsert("c1", dec!(100))).await.unwrap();
    let second = repository.upsert_budget(upsert("c1", dec!(100))).await.unwrap();

    assert_eq!(count_rows(&test_db), 1);
    assert_eq!(first.id, second.id);
    assert_eq!(second.amount, dec!(100));
    assert_eq!(second.alert_threshold, 80);
}

#[tokio::test]
async fn upsert_updates_the_existing_ceiling() {
    let (test_db, repository) = setup();

    repository.upsert_budget(upsert("c1", dec!(100))).await.unwrap();
    let mut changed = upsert("c1", dec!(250));
    changed.alert_threshold = Some(90);
    let stored = repository.upsert_budget(changed).await.unwrap();

    assert_eq!(count_rows(&test_db), 1);
    assert_eq!(stored.amount, dec!(250));
    assert_eq!(stored.alert_threshold, 90);
}

#[tokio::test]
async fn concurrent_upserts_for_the_same_key_yield_one_row() {
    let (test_db, repository) = setup();
    let repository = Arc::new(repository);

    // Both writes are issued before either completes; the conditional
    // insert plus the UNIQUE constraint must still converge on one row.
    let a = repository.clone();
    let b = repository.clone();
    let (res_a, res_b) = tokio::join!(
        a.upsert_budget(upsert("c1", dec!(111))),
        b.upsert_budget(upsert("c1", dec!(222))),
    );
    res_a.unwrap();
    res_b.unwrap();

    assert_eq!(count_rows(&test_db), 1);
}

#[tokio::test]
async fn budgets_for_distinct_categories_coexist() {
    let (test_db, repository) = setup();

    repository.upsert_budget(upsert("c1", dec!(100))).await.unwrap();
    repository.upsert_budget(upsert("c2", dec!(200))).await.unwrap();

    assert_eq!(count_rows(&test_db), 2);

    let rows = repository.get_budgets("h1", 2025, 3).await.unwrap();
    assert_eq!(rows.len(), 2);
    let names: Vec<&str> = rows.iter().map(|b| b.category_name.as_str()).collect();
    assert!(names.contains(&"Groceries"));
    assert!(names.contains(&"Transport"));
}

#[tokio::test]
async fn partial_update_leaves_omitted_fields_untouched() {
    let (_test_db, repository) = setup();

    let mut seeded = upsert("c1", dec!(100));
    seeded.alert_threshold = Some(70);
    let stored = repository.upsert_budget(seeded).await.unwrap();

    let updated = repository
        .update_budget(
            &stored.id,
            BudgetUpdate {
                amount: Some(dec!(300)),
                alert_threshold: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.amount, dec!(300));
    assert_eq!(updated.alert_threshold, 70);
}

#[tokio::test]
async fn delete_missing_budget_is_not_found() {
    let (_test_db, repository) = setup();

    let err = repository.delete_budget("nope").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let (test_db, repository) = setup();

    let stored = repository.upsert_budget(upsert("c1", dec!(100))).await.unwrap();
    repository.delete_budget(&stored.id).await.unwrap();
    assert_eq!(count_rows(&test_db), 0);
}
