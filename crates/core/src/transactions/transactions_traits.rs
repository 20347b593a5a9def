//! Transaction repository and service traits.

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction, TransactionUpdate};
use crate::errors::Result;

/// Trait defining the contract for Transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Persists the two sides of a transfer inside one database
    /// transaction: either both rows exist afterwards or neither does.
    async fn create_pair(
        &self,
        debit: NewTransaction,
        credit: NewTransaction,
    ) -> Result<(Transaction, Transaction)>;

    /// Full replace of every mutable field; `created_at` is preserved and
    /// `updated_at` is stamped.
    async fn update(
        &self,
        transaction_id: &str,
        user_id: &str,
        transaction: Transaction,
    ) -> Result<Transaction>;

    /// Applies a subset of mutable fields and stamps `updated_at`. An empty
    /// field set is rejected with `ValidationError::NoFieldsToUpdate`.
    async fn update_partial(
        &self,
        transaction_id: &str,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    async fn soft_delete(&self, transaction_id: &str, user_id: &str) -> Result<()>;

    /// Soft-deletes every live transaction linked by `transfer_id`.
    async fn soft_delete_by_transfer_id(&self, transfer_id: &str, user_id: &str) -> Result<()>;

    fn get_by_id(&self, transaction_id: &str, user_id: &str) -> Result<Option<Transaction>>;

    /// Lists a user's live transactions ordered by due date ascending, then
    /// creation order. Always yields a (possibly empty) vector.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>>;

    fn get_by_transfer_id(&self, transfer_id: &str, user_id: &str) -> Result<Vec<Transaction>>;

    /// True when any live transaction references the account.
    fn has_any_for_account(&self, account_id: &str, user_id: &str) -> Result<bool>;

    /// True when any live transaction references the category.
    fn has_any_for_category(&self, category_id: &str, user_id: &str) -> Result<bool>;

    /// Earliest live transaction on the account carrying the opening-balance
    /// marker description, if any.
    fn opening_balance_for_account(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<Option<Transaction>>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    fn get_transaction(&self, transaction_id: &str, user_id: &str) -> Result<Transaction>;

    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;

    async fn update_transaction(
        &self,
        transaction_id: &str,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    /// Deletes a transaction. A transaction carrying a transfer id takes
    /// its linked counterpart down with it.
    async fn delete_transaction(&self, transaction_id: &str, user_id: &str) -> Result<()>;

    fn transactions_for_transfer(
        &self,
        transfer_id: &str,
        user_id: &str,
    ) -> Result<Vec<Transaction>>;
}
