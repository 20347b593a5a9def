use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_constants::OPENING_BALANCE_DESCRIPTION;
use super::accounts_errors::AccountError;
use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};

/// Converts a major-unit value to minor-unit cents, rounding half-up.
fn to_cents(value: Decimal) -> Result<i64> {
    (value * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "value {value} is out of range"
            )))
        })
}

/// Service for managing accounts and their opening-balance bootstrap.
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl AccountService {
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            category_repository,
            transaction_repository,
        }
    }

    /// Seeds the synthetic opening-balance transaction for an account.
    ///
    /// The category is resolved by convention from the account type; its
    /// absence means the user's defaults were never seeded and surfaces as
    /// `AccountError::DefaultCategoryMissing`.
    async fn seed_opening_balance(
        &self,
        account: &Account,
        initial_value: Decimal,
        due_date: NaiveDate,
        competence_date: NaiveDate,
    ) -> Result<Transaction> {
        let (category_name, category_type, transaction_type) =
            account.account_type.bootstrap_convention();

        let category = self
            .category_repository
            .get_by_name(category_name, category_type, &account.user_id)?
            .ok_or_else(|| AccountError::DefaultCategoryMissing {
                category: category_name.to_string(),
            })?;

        let transaction = NewTransaction {
            id: None,
            user_id: account.user_id.clone(),
            description: OPENING_BALANCE_DESCRIPTION.to_string(),
            amount: to_cents(initial_value)?,
            transaction_type,
            category_id: category.id,
            account_id: account.id.clone(),
            due_date,
            competence_date,
            is_paid: true,
            observation: None,
            is_recurring: false,
            recurring_type: None,
            installments: 1,
            current_installment: 1,
            parent_transaction_id: None,
            transfer_id: None,
        };

        let created = self.transaction_repository.create(transaction).await?;
        debug!(
            "opening balance {} seeded for account {}",
            created.id, account.id
        );
        Ok(created)
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        let initial_value = new_account.initial_value;
        let due_date = new_account.due_date;
        let competence_date = new_account.competence_date;

        let account = self.repository.create(new_account).await?;

        // The account itself is the deliverable; a failed bootstrap must not
        // undo it. Callers that care verify the opening balance separately.
        if let Err(err) = self
            .seed_opening_balance(&account, initial_value, due_date, competence_date)
            .await
        {
            warn!(
                "opening balance for account {} not created: {}",
                account.id, err
            );
        }

        Ok(account)
    }

    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;

        let account_id = account_update.id.clone().unwrap_or_default();
        if self
            .repository
            .get_by_id(&account_id, &account_update.user_id)?
            .is_none()
        {
            return Err(Error::NotFound(format!("account {account_id}")));
        }

        let initial_value = account_update.initial_value;
        let bootstrap_dates = account_update.due_date.zip(account_update.competence_date);

        let account = self.repository.update(account_update).await?;

        if let Some((due_date, competence_date)) = bootstrap_dates {
            match self
                .transaction_repository
                .opening_balance_for_account(&account.id, &account.user_id)?
            {
                Some(existing) => {
                    let update = TransactionUpdate {
                        due_date: Some(due_date),
                        competence_date: Some(competence_date),
                        amount: initial_value.map(to_cents).transpose()?,
                        ..TransactionUpdate::default()
                    };
                    self.transaction_repository
                        .update_partial(&existing.id, &account.user_id, update)
                        .await?;
                }
                None => {
                    self.seed_opening_balance(
                        &account,
                        initial_value.unwrap_or_default(),
                        due_date,
                        competence_date,
                    )
                    .await?;
                }
            }
        }

        Ok(account)
    }

    async fn delete_account(&self, account_id: &str, user_id: &str) -> Result<()> {
        let account = self.get_account(account_id, user_id)?;

        if self
            .transaction_repository
            .has_any_for_account(account_id, user_id)?
        {
            return Err(AccountError::HasTransactions {
                account: account.name,
            }
            .into());
        }

        self.repository.soft_delete(account_id, user_id).await
    }

    fn get_account(&self, account_id: &str, user_id: &str) -> Result<Account> {
        self.repository
            .get_by_id(account_id, user_id)?
            .ok_or_else(|| Error::NotFound(format!("account {account_id}")))
    }

    fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.list(user_id)
    }

    fn has_dependent_transactions(&self, account_id: &str, user_id: &str) -> Result<bool> {
        self.transaction_repository
            .has_any_for_account(account_id, user_id)
    }

    fn get_opening_balance_transaction(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<Option<Transaction>> {
        self.transaction_repository
            .opening_balance_for_account(account_id, user_id)
    }
}
