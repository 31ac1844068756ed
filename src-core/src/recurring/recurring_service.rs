use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::recurring_model::{
    advance_due_date, NewRecurring, RecurringTransaction, RecurringUpdate,
};
use super::recurring_traits::{RecurringRepositoryTrait, RecurringServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};

/// Service for recurring transaction templates
pub struct RecurringService {
    repository: Arc<dyn RecurringRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl RecurringService {
    pub fn new(
        repository: Arc<dyn RecurringRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        RecurringService {
            repository,
            transaction_repository,
        }
    }
}

#[async_trait]
impl RecurringServiceTrait for RecurringService {
    fn get_recurring(&self, id: &str) -> Result<RecurringTransaction> {
        self.repository.get_recurring(id)
    }

    fn list_recurring(
        &self,
        household_id: &str,
        active_only: bool,
    ) -> Result<Vec<RecurringTransaction>> {
        self.repository.list_recurring(household_id, active_only)
    }

    async fn create_recurring(&self, new_recurring: NewRecurring) -> Result<RecurringTransaction> {
        new_recurring.validate()?;
        self.repository.create_recurring(new_recurring).await
    }

    async fn update_recurring(
        &self,
        id: &str,
        update: RecurringUpdate,
    ) -> Result<RecurringTransaction> {
        update.validate()?;
        self.repository.update_recurring(id, update).await
    }

    async fn delete_recurring(&self, id: &str) -> Result<usize> {
        self.repository.delete_recurring(id).await
    }

    async fn register_now(&self, id: &str) -> Result<Transaction> {
        let template = self.repository.get_recurring(id)?;
        if !template.is_active {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Recurring transaction '{}' is inactive",
                id
            ))));
        }

        debug!(
            "Registering recurring {} due {}",
            template.id, template.next_due_date
        );

        let new_transaction = NewTransaction {
            id: None,
            household_id: template.household_id.clone(),
            profile_id: template.profile_id.clone(),
            account_id: template.account_id.clone(),
            category_id: template.category_id.clone(),
            transaction_type: template.transaction_type,
            amount: template.amount,
            date: template.next_due_date,
            note: template.description.clone(),
            transfer_to_account_id: None,
            recurring_id: Some(template.id.clone()),
        };
        // Stored templates are validated on the way in, but the invariant on
        // the ledger side does not rely on that.
        new_transaction.validate()?;
        let created = self
            .transaction_repository
            .create_transaction(new_transaction)
            .await?;

        let next = advance_due_date(
            template.next_due_date,
            template.frequency,
            template.day_of_month,
        )?;
        self.repository
            .update_recurring(
                &template.id,
                RecurringUpdate {
                    next_due_date: Some(next),
                    ..Default::default()
                },
            )
            .await?;

        Ok(created)
    }
}
