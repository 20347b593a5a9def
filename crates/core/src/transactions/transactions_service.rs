use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::transactions_model::{NewTransaction, Transaction, TransactionUpdate};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for managing transactions.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        self.repository.create(new_transaction).await
    }

    fn get_transaction(&self, transaction_id: &str, user_id: &str) -> Result<Transaction> {
        self.repository
            .get_by_id(transaction_id, user_id)?
            .ok_or_else(|| Error::NotFound(format!("transaction {transaction_id}")))
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repository.list_by_user(user_id)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        update.validate()?;
        if update.is_empty() {
            return Err(ValidationError::NoFieldsToUpdate.into());
        }
        self.repository
            .update_partial(transaction_id, user_id, update)
            .await
    }

    async fn delete_transaction(&self, transaction_id: &str, user_id: &str) -> Result<()> {
        let transaction = self.get_transaction(transaction_id, user_id)?;

        // Both sides of a transfer live and die together; deleting only one
        // would break the pairing invariant.
        match transaction.transfer_id.as_deref().filter(|t| !t.is_empty()) {
            Some(transfer_id) => {
                debug!(
                    "deleting transfer {} via transaction {}",
                    transfer_id, transaction_id
                );
                self.repository
                    .soft_delete_by_transfer_id(transfer_id, user_id)
                    .await
            }
            None => self.repository.soft_delete(transaction_id, user_id).await,
        }
    }

    fn transactions_for_transfer(
        &self,
        transfer_id: &str,
        user_id: &str,
    ) -> Result<Vec<Transaction>> {
        self.repository.get_by_transfer_id(transfer_id, user_id)
    }
}
