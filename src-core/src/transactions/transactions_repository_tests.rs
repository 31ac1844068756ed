use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::transactions_model::{
    NewTransaction, TransactionFilter, TransactionType, TransactionUpdate,
};
use super::transactions_repository::TransactionRepository;
use super::transactions_traits::TransactionRepositoryTrait;
use crate::db::test_fixtures::TestDb;
use crate::errors::Error;
use crate::transactions::TransactionError;

fn setup() -> (TestDb, TransactionRepository) {
    let test_db = TestDb::new();
    test_db.seed_household("h1");
    test_db.seed_profile("p1", "h1");
    test_db.seed_category("c1", "h1", "Groceries");
    test_db.seed_category("c2", "h1", "Transport");
    test_db.seed_account("a1", "h1", "100000");
    test_db.seed_account("a2", "h1", "5000");
    let repository = TransactionRepository::new(test_db.pool.clone(), test_db.writer.clone());
    (test_db, repository)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn new_transaction(
    transaction_type: TransactionType,
    amount: Decimal,
    tx_date: NaiveDate,
    category_id: &str,
) -> NewTransaction {
    NewTransaction {
        id: None,
        household_id: "h1".to_string(),
        profile_id: "p1".to_string(),
        account_id: "a1".to_string(),
        category_id: category_id.to_string(),
        transaction_type,
        amount,
        date: tx_date,
        note: None,
        transfer_to_account_id: match transaction_type {
            TransactionType::Transfer => Some("a2".to_string()),
            _ => None,
        },
        recurring_id: None,
    }
}

#[tokio::test]
async fn search_is_bounded_by_the_inclusive_date_range() {
    let (_test_db, repository) = setup();

    for (day, amount) in [(1, dec!(10)), (15, dec!(20)), (31, dec!(30))] {
        repository
            .create_transaction(new_transaction(
                TransactionType::Expense,
                amount,
                date(2025, 3, day),
                "c1",
            ))
            .await
            .unwrap();
    }
    repository
        .create_transaction(new_transaction(
            TransactionType::Expense,
            dec!(99),
            date(2025, 4, 1),
            "c1",
        ))
        .await
        .unwrap();

    let results = repository
        .search_transactions(TransactionFilter {
            household_id: "h1".to_string(),
            from_date: Some(date(2025, 3, 1)),
            to_date: Some(date(2025, 3, 31)),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    // Newest first.
    assert_eq!(results[0].date, date(2025, 3, 31));
    assert_eq!(results[2].date, date(2025, 3, 1));
    // The joined category rides along.
    assert_eq!(
        results[0].category.as_ref().map(|c| c.name.as_str()),
        Some("Groceries")
    );
}

#[tokio::test]
async fn ledger_respects_the_as_of_cutoff() {
    let (_test_db, repository) = setup();

    repository
        .create_transaction(new_transaction(
            TransactionType::Income,
            dec!(50000),
            date(2025, 3, 10),
            "c1",
        ))
        .await
        .unwrap();
    repository
        .create_transaction(new_transaction(
            TransactionType::Expense,
            dec!(20000),
            date(2025, 3, 20),
            "c1",
        ))
        .await
        .unwrap();

    let full = repository.account_ledger("a1", None).unwrap();
    assert_eq!(full.len(), 2);

    // The cutoff is inclusive, so the day of the income counts.
    let early = repository
        .account_ledger("a1", Some(date(2025, 3, 10)))
        .unwrap();
    assert_eq!(early.len(), 1);
    assert_eq!(early[0].amount, dec!(50000));
}

#[tokio::test]
async fn transfers_show_up_on_both_sides() {
    let (_test_db, repository) = setup();

    repository
        .create_transaction(new_transaction(
            TransactionType::Transfer,
            dec!(10000),
            date(2025, 3, 5),
            "c1",
        ))
        .await
        .unwrap();

    let out = repository.account_ledger("a1", None).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].transaction_type, TransactionType::Transfer);

    let incoming = repository.incoming_transfers("a2", None).unwrap();
    assert_eq!(incoming, vec![dec!(10000)]);

    // Nothing arrives at the source account.
    assert!(repository.incoming_transfers("a1", None).unwrap().is_empty());
}

#[tokio::test]
async fn expense_totals_group_by_category_exactly() {
    let (_test_db, repository) = setup();

    for (amount, category) in [
        (dec!(0.10), "c1"),
        (dec!(0.20), "c1"),
        (dec!(5000), "c2"),
    ] {
        repository
            .create_transaction(new_transaction(
                TransactionType::Expense,
                amount,
                date(2025, 3, 15),
                category,
            ))
            .await
            .unwrap();
    }
    // Income never counts as spend.
    repository
        .create_transaction(new_transaction(
            TransactionType::Income,
            dec!(777),
            date(2025, 3, 15),
            "c1",
        ))
        .await
        .unwrap();

    let mut spends = repository
        .expenses_by_category("h1", date(2025, 3, 1), date(2025, 3, 31))
        .await
        .unwrap();
    spends.sort_by(|a, b| a.category_id.cmp(&b.category_id));

    assert_eq!(spends.len(), 2);
    assert_eq!(spends[0].category_id, "c1");
    assert_eq!(spends[0].total, dec!(0.30));
    assert_eq!(spends[1].total, dec!(5000));
}

#[tokio::test]
async fn partial_update_touches_only_provided_fields() {
    let (_test_db, repository) = setup();

    let created = repository
        .create_transaction(new_transaction(
            TransactionType::Expense,
            dec!(100),
            date(2025, 3, 15),
            "c1",
        ))
        .await
        .unwrap();

    let updated = repository
        .update_transaction(
            &created.id,
            TransactionUpdate {
                amount: Some(dec!(150)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.amount, dec!(150));
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.category_id, created.category_id);
    assert_eq!(updated.account_id, created.account_id);
}

#[tokio::test]
async fn delete_missing_transaction_is_not_found() {
    let (_test_db, repository) = setup();

    let err = repository.delete_transaction("nope").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transaction(TransactionError::NotFound(_))
    ));
}
