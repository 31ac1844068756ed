use std::sync::Arc;

use super::categories_model::{NewCategory, UpdateCategory};
use super::categories_repository::CategoryRepository;
use super::categories_service::CategoryService;
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::db::test_fixtures::TestDb;
use crate::errors::{Error, ValidationError};

fn setup() -> (TestDb, CategoryRepository) {
    let test_db = TestDb::new();
    test_db.seed_household("h1");
    test_db.seed_household("h2");
    let repository = CategoryRepository::new(test_db.pool.clone(), test_db.writer.clone());
    (test_db, repository)
}

fn new_category(household_id: Option<&str>, name: &str) -> NewCategory {
    NewCategory {
        id: None,
        household_id: household_id.map(|h| h.to_string()),
        parent_id: None,
        name: name.to_string(),
        icon: None,
        color: None,
        category_type: "expense".to_string(),
        is_system: false,
        sort_order: 0,
        created_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

#[tokio::test]
async fn household_sees_its_own_and_system_categories_only() {
    let (_test_db, repository) = setup();

    repository
        .create_category(new_category(Some("h1"), "Mascotas"))
        .await
        .unwrap();
    repository
        .create_category(new_category(Some("h2"), "Jardín"))
        .await
        .unwrap();
    let mut system = new_category(None, "Supermercado");
    system.is_system = true;
    repository.create_category(system).await.unwrap();

    let visible = repository.get_categories("h1").unwrap();
    let names: Vec<&str> = visible.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"Mascotas"));
    assert!(names.contains(&"Supermercado"));
    assert!(!names.contains(&"Jardín"));
}

#[tokio::test]
async fn system_categories_reject_update_and_delete() {
    let (_test_db, repository) = setup();

    let mut system = new_category(None, "Transporte");
    system.is_system = true;
    let created = repository.create_category(system).await.unwrap();

    let update_err = repository
        .update_category(
            &created.id,
            UpdateCategory {
                name: Some("Otro".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        update_err,
        Error::Validation(ValidationError::InvalidInput(_))
    ));

    let delete_err = repository.delete_category(&created.id).await.unwrap_err();
    assert!(matches!(
        delete_err,
        Error::Validation(ValidationError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn delete_is_rejected_while_transactions_reference_the_category() {
    let (test_db, repository) = setup();
    test_db.seed_profile("p1", "h1");
    test_db.seed_category("c1", "h1", "Comida");
    test_db.seed_account("a1", "h1", "0");

    let service = CategoryService::new(Arc::new(CategoryRepository::new(
        test_db.pool.clone(),
        test_db.writer.clone(),
    )));

    let tx_repo = crate::transactions::TransactionRepository::new(
        test_db.pool.clone(),
        test_db.writer.clone(),
    );
    use crate::transactions::{NewTransaction, TransactionRepositoryTrait, TransactionType};
    tx_repo
        .create_transaction(NewTransaction {
            id: None,
            household_id: "h1".to_string(),
            profile_id: "p1".to_string(),
            account_id: "a1".to_string(),
            category_id: "c1".to_string(),
            transaction_type: TransactionType::Expense,
            amount: rust_decimal_macros::dec!(1000),
            date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            note: None,
            transfer_to_account_id: None,
            recurring_id: None,
        })
        .await
        .unwrap();

    let err = service.delete_category("c1").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidInput(_))
    ));
    assert!(repository.get_category_by_id("c1").unwrap().is_some());
}

#[tokio::test]
async fn deleting_a_parent_takes_its_children_along() {
    let (_test_db, repository) = setup();

    let parent = repository
        .create_category(new_category(Some("h1"), "Hogar"))
        .await
        .unwrap();
    let mut child = new_category(Some("h1"), "Limpieza");
    child.parent_id = Some(parent.id.clone());
    let child = repository.create_category(child).await.unwrap();

    let deleted = repository.delete_category(&parent.id).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(repository.get_category_by_id(&child.id).unwrap().is_none());
}

#[tokio::test]
async fn type_filter_includes_both_typed_categories() {
    let (_test_db, repository) = setup();

    repository
        .create_category(new_category(Some("h1"), "Arriendo"))
        .await
        .unwrap();
    let mut income = new_category(Some("h1"), "Sueldo");
    income.category_type = "income".to_string();
    repository.create_category(income).await.unwrap();
    let mut both = new_category(Some("h1"), "Ajustes");
    both.category_type = "both".to_string();
    repository.create_category(both).await.unwrap();

    let expenses = repository
        .get_categories_by_type("h1", super::categories_model::CategoryType::Expense)
        .unwrap();
    let names: Vec<&str> = expenses.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"Arriendo"));
    assert!(names.contains(&"Ajustes"));
    assert!(!names.contains(&"Sueldo"));
}
