//! Account repository and service traits.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;
use crate::transactions::Transaction;

/// Trait defining the contract for Account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account. Bootstrap-only fields of `NewAccount`
    /// (initial value and dates) are ignored by the store.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Updates an existing account; `created_at` is preserved and
    /// `updated_at` is stamped.
    async fn update(&self, account_update: AccountUpdate) -> Result<Account>;

    /// Soft-deletes an account. Dependency checks happen in the service.
    async fn soft_delete(&self, account_id: &str, user_id: &str) -> Result<()>;

    /// Fetches a live account owned by the user.
    fn get_by_id(&self, account_id: &str, user_id: &str) -> Result<Option<Account>>;

    /// Lists the user's live accounts, ordered by name.
    fn list(&self, user_id: &str) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates an account and seeds its opening-balance transaction.
    /// A missing bootstrap category is logged, not fatal.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Updates an account; supplied bootstrap dates update (or create) the
    /// opening-balance transaction.
    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account>;

    /// Soft-deletes an account, blocked while transactions reference it.
    async fn delete_account(&self, account_id: &str, user_id: &str) -> Result<()>;

    fn get_account(&self, account_id: &str, user_id: &str) -> Result<Account>;

    fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>>;

    /// True when any live transaction references the account.
    fn has_dependent_transactions(&self, account_id: &str, user_id: &str) -> Result<bool>;

    /// The account's opening-balance transaction, if one exists.
    fn get_opening_balance_transaction(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<Option<Transaction>>;
}
