//! In-memory repository fakes shared by the service tests.
//!
//! These implement the repository traits over `Arc<Mutex<Vec<_>>>` with the
//! same observable semantics the storage crate provides (soft deletes,
//! ordering, atomic-looking cascades).

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::accounts::{Account, AccountRepositoryTrait, AccountUpdate, NewAccount};
use crate::categories::{
    Category, CategoryRepositoryTrait, CategoryType, CategoryUpdate, NewCategory,
    TRANSFER_CATEGORY_COLOR, TRANSFER_CATEGORY_DESCRIPTION, TRANSFER_CATEGORY_ICON,
    TRANSFER_CATEGORY_NAME,
};
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};

fn materialize_transaction(new: NewTransaction) -> Transaction {
    let now = Utc::now().naive_utc();
    Transaction {
        id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        user_id: new.user_id,
        description: new.description,
        amount: new.amount,
        transaction_type: new.transaction_type,
        category_id: new.category_id,
        account_id: new.account_id,
        due_date: new.due_date,
        competence_date: new.competence_date,
        is_paid: new.is_paid,
        observation: new.observation,
        is_recurring: new.is_recurring,
        recurring_type: new.recurring_type,
        installments: new.installments,
        current_installment: new.current_installment,
        parent_transaction_id: new.parent_transaction_id,
        transfer_id: new.transfer_id,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

#[derive(Default)]
pub(crate) struct InMemoryTransactionRepository {
    pub rows: Arc<Mutex<Vec<Transaction>>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_rows(&self) -> Vec<Transaction> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryTransactionRepository {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let transaction = materialize_transaction(new_transaction);
        self.rows.lock().unwrap().push(transaction.clone());
        Ok(transaction)
    }

    async fn create_pair(
        &self,
        debit: NewTransaction,
        credit: NewTransaction,
    ) -> Result<(Transaction, Transaction)> {
        let debit = materialize_transaction(debit);
        let credit = materialize_transaction(credit);
        let mut rows = self.rows.lock().unwrap();
        rows.push(debit.clone());
        rows.push(credit.clone());
        Ok((debit, credit))
    }

    async fn update(
        &self,
        transaction_id: &str,
        user_id: &str,
        transaction: Transaction,
    ) -> Result<Transaction> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == transaction_id && t.user_id == user_id)
            .ok_or_else(|| Error::NotFound(format!("transaction {transaction_id}")))?;
        let mut replacement = transaction;
        replacement.id = row.id.clone();
        replacement.user_id = row.user_id.clone();
        replacement.created_at = row.created_at;
        replacement.updated_at = Utc::now().naive_utc();
        *row = replacement.clone();
        Ok(replacement)
    }

    async fn update_partial(
        &self,
        transaction_id: &str,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        if update.is_empty() {
            return Err(ValidationError::NoFieldsToUpdate.into());
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == transaction_id && t.user_id == user_id && t.deleted_at.is_none())
            .ok_or_else(|| Error::NotFound(format!("transaction {transaction_id}")))?;
        if let Some(value) = update.description {
            row.description = value;
        }
        if let Some(value) = update.amount {
            row.amount = value;
        }
        if let Some(value) = update.transaction_type {
            row.transaction_type = value;
        }
        if let Some(value) = update.category_id {
            row.category_id = value;
        }
        if let Some(value) = update.account_id {
            row.account_id = value;
        }
        if let Some(value) = update.due_date {
            row.due_date = value;
        }
        if let Some(value) = update.competence_date {
            row.competence_date = value;
        }
        if let Some(value) = update.is_paid {
            row.is_paid = value;
        }
        if let Some(value) = update.observation {
            row.observation = value;
        }
        if let Some(value) = update.is_recurring {
            row.is_recurring = value;
        }
        if let Some(value) = update.recurring_type {
            row.recurring_type = value;
        }
        if let Some(value) = update.installments {
            row.installments = value;
        }
        if let Some(value) = update.current_installment {
            row.current_installment = value;
        }
        row.updated_at = Utc::now().naive_utc();
        Ok(row.clone())
    }

    async fn soft_delete(&self, transaction_id: &str, user_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            if row.id == transaction_id && row.user_id == user_id && row.deleted_at.is_none() {
                row.deleted_at = Some(now);
            }
        }
        Ok(())
    }

    async fn soft_delete_by_transfer_id(&self, transfer_id: &str, user_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            if row.transfer_id.as_deref() == Some(transfer_id)
                && row.user_id == user_id
                && row.deleted_at.is_none()
            {
                row.deleted_at = Some(now);
            }
        }
        Ok(())
    }

    fn get_by_id(&self, transaction_id: &str, user_id: &str) -> Result<Option<Transaction>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == transaction_id && t.user_id == user_id && t.deleted_at.is_none())
            .cloned())
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut result: Vec<Transaction> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id && t.deleted_at.is_none())
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(result)
    }

    fn get_by_transfer_id(&self, transfer_id: &str, user_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| {
                t.transfer_id.as_deref() == Some(transfer_id)
                    && t.user_id == user_id
                    && t.deleted_at.is_none()
            })
            .cloned()
            .collect())
    }

    fn has_any_for_account(&self, account_id: &str, user_id: &str) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.account_id == account_id && t.user_id == user_id && t.deleted_at.is_none()))
    }

    fn has_any_for_category(&self, category_id: &str, user_id: &str) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.category_id == category_id && t.user_id == user_id && t.deleted_at.is_none()))
    }

    fn opening_balance_for_account(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<Option<Transaction>> {
        let rows = self.rows.lock().unwrap();
        let mut matches: Vec<&Transaction> = rows
            .iter()
            .filter(|t| {
                t.account_id == account_id
                    && t.user_id == user_id
                    && t.description == crate::accounts::OPENING_BALANCE_DESCRIPTION
                    && t.deleted_at.is_none()
            })
            .collect();
        matches.sort_by_key(|t| t.created_at);
        Ok(matches.first().map(|t| (*t).clone()))
    }
}

fn materialize_category(new: NewCategory) -> Category {
    let now = Utc::now().naive_utc();
    Category {
        id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        user_id: new.user_id,
        name: new.name,
        description: new.description,
        category_type: new.category_type,
        color: new.color,
        icon: new.icon,
        parent_id: new.parent_id,
        is_active: true,
        visible: new.visible.unwrap_or(true),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCategoryRepository {
    pub rows: Arc<Mutex<Vec<Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_rows(&self) -> Vec<Category> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        let category = materialize_category(new_category);
        self.rows.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn update(&self, update: CategoryUpdate) -> Result<Category> {
        let id = update
            .id
            .clone()
            .ok_or(Error::Validation(ValidationError::MissingField("id".into())))?;
        let now = Utc::now().naive_utc();
        let mut rows = self.rows.lock().unwrap();
        let (is_root, old_color) = {
            let row = rows
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| Error::NotFound(format!("category {id}")))?;
            (row.parent_id.is_none(), row.color.clone())
        };
        let propagate = is_root && update.color != old_color;
        for row in rows.iter_mut() {
            if row.id == id {
                row.name = update.name.clone();
                row.description = update.description.clone();
                row.color = update.color.clone();
                row.icon = update.icon.clone();
                if let Some(value) = update.is_active {
                    row.is_active = value;
                }
                if let Some(value) = update.visible {
                    row.visible = value;
                }
                row.updated_at = now;
            } else if propagate
                && row.parent_id.as_deref() == Some(id.as_str())
                && row.deleted_at.is_none()
            {
                row.color = update.color.clone();
                row.updated_at = now;
            }
        }
        Ok(rows.iter().find(|c| c.id == id).cloned().unwrap())
    }

    async fn soft_delete_with_children(&self, category_id: &str, user_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            let owned = row.user_id.as_deref() == Some(user_id);
            let in_subtree =
                row.id == category_id || row.parent_id.as_deref() == Some(category_id);
            if owned && in_subtree && row.deleted_at.is_none() {
                row.deleted_at = Some(now);
                row.updated_at = now;
            }
        }
        Ok(())
    }

    async fn hard_delete_with_children(&self, category_id: &str) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|c| c.id != category_id && c.parent_id.as_deref() != Some(category_id));
        Ok(())
    }

    async fn get_or_create_transfer_category(&self) -> Result<Category> {
        {
            let rows = self.rows.lock().unwrap();
            if let Some(found) = rows.iter().find(|c| {
                c.category_type == CategoryType::Transfer
                    && c.name == TRANSFER_CATEGORY_NAME
                    && c.deleted_at.is_none()
            }) {
                return Ok(found.clone());
            }
            if let Some(found) = rows
                .iter()
                .find(|c| c.category_type == CategoryType::Transfer && c.deleted_at.is_none())
            {
                return Ok(found.clone());
            }
        }
        let category = materialize_category(NewCategory {
            id: None,
            user_id: None,
            name: TRANSFER_CATEGORY_NAME.to_string(),
            description: TRANSFER_CATEGORY_DESCRIPTION.to_string(),
            category_type: CategoryType::Transfer,
            color: TRANSFER_CATEGORY_COLOR.to_string(),
            icon: TRANSFER_CATEGORY_ICON.to_string(),
            parent_id: None,
            visible: Some(false),
        });
        self.rows.lock().unwrap().push(category.clone());
        Ok(category)
    }

    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == category_id)
            .cloned())
    }

    fn get_by_name(
        &self,
        name: &str,
        category_type: CategoryType,
        user_id: &str,
    ) -> Result<Option<Category>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| {
                c.name == name
                    && c.category_type == category_type
                    && c.user_id.as_deref() == Some(user_id)
                    && c.deleted_at.is_none()
            })
            .cloned())
    }

    fn list(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut result: Vec<Category> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id.as_deref() == Some(user_id) && c.deleted_at.is_none())
            .cloned()
            .collect();
        result.sort_by_key(|c| c.name.to_lowercase());
        Ok(result)
    }

    fn list_by_type(&self, user_id: &str, category_type: CategoryType) -> Result<Vec<Category>> {
        let mut result: Vec<Category> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                c.user_id.as_deref() == Some(user_id)
                    && c.category_type == category_type
                    && c.deleted_at.is_none()
            })
            .cloned()
            .collect();
        result.sort_by_key(|c| c.name.to_lowercase());
        Ok(result)
    }

    fn children(&self, parent_id: &str, user_id: &str) -> Result<Vec<Category>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                c.parent_id.as_deref() == Some(parent_id)
                    && c.user_id.as_deref() == Some(user_id)
                    && c.deleted_at.is_none()
            })
            .cloned()
            .collect())
    }

    fn children_including_deleted(&self, parent_id: &str) -> Result<Vec<Category>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(parent_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryAccountRepository {
    pub rows: Arc<Mutex<Vec<Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account: Account) {
        self.rows.lock().unwrap().push(account);
    }
}

#[async_trait]
impl AccountRepositoryTrait for InMemoryAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        let now = Utc::now().naive_utc();
        let account = Account {
            id: new_account.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: new_account.user_id,
            name: new_account.name,
            currency: new_account.currency,
            color: new_account.color,
            account_type: new_account.account_type,
            is_active: new_account.is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.rows.lock().unwrap().push(account.clone());
        Ok(account)
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        let id = account_update
            .id
            .clone()
            .ok_or(Error::Validation(ValidationError::MissingField("id".into())))?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|a| a.id == id && a.user_id == account_update.user_id)
            .ok_or_else(|| Error::NotFound(format!("account {id}")))?;
        row.name = account_update.name;
        row.currency = account_update.currency;
        row.color = account_update.color;
        row.account_type = account_update.account_type;
        row.is_active = account_update.is_active;
        row.updated_at = Utc::now().naive_utc();
        Ok(row.clone())
    }

    async fn soft_delete(&self, account_id: &str, user_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            if row.id == account_id && row.user_id == user_id && row.deleted_at.is_none() {
                row.deleted_at = Some(now);
                row.updated_at = now;
            }
        }
        Ok(())
    }

    fn get_by_id(&self, account_id: &str, user_id: &str) -> Result<Option<Account>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == account_id && a.user_id == user_id && a.deleted_at.is_none())
            .cloned())
    }

    fn list(&self, user_id: &str) -> Result<Vec<Account>> {
        let mut result: Vec<Account> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id && a.deleted_at.is_none())
            .cloned()
            .collect();
        result.sort_by_key(|a| a.name.to_lowercase());
        Ok(result)
    }
}
