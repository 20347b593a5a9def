//! Database models for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use caixa_core::errors::Result;
use caixa_core::transactions::{NewTransaction, Transaction, TransactionUpdate};

/// Database model for transactions.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: i64,
    pub transaction_type: String,
    pub category_id: String,
    pub account_id: String,
    pub due_date: NaiveDate,
    pub competence_date: NaiveDate,
    pub is_paid: bool,
    pub observation: Option<String>,
    pub is_recurring: bool,
    pub recurring_type: Option<String>,
    pub installments: i32,
    pub current_installment: i32,
    pub parent_transaction_id: Option<String>,
    pub transfer_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl TransactionDB {
    /// Materializes a row for insertion, stamping id and timestamps.
    pub fn from_new(new_transaction: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: new_transaction
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: new_transaction.user_id,
            description: new_transaction.description,
            amount: new_transaction.amount,
            transaction_type: new_transaction.transaction_type.as_str().to_string(),
            category_id: new_transaction.category_id,
            account_id: new_transaction.account_id,
            due_date: new_transaction.due_date,
            competence_date: new_transaction.competence_date,
            is_paid: new_transaction.is_paid,
            observation: new_transaction.observation,
            is_recurring: new_transaction.is_recurring,
            recurring_type: new_transaction.recurring_type,
            installments: new_transaction.installments,
            current_installment: new_transaction.current_installment,
            parent_transaction_id: new_transaction.parent_transaction_id,
            transfer_id: new_transaction.transfer_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Full replace of the mutable columns, preserving identity fields.
    pub fn apply_replace(existing: Self, replacement: Transaction) -> Self {
        Self {
            id: existing.id,
            user_id: existing.user_id,
            description: replacement.description,
            amount: replacement.amount,
            transaction_type: replacement.transaction_type.as_str().to_string(),
            category_id: replacement.category_id,
            account_id: replacement.account_id,
            due_date: replacement.due_date,
            competence_date: replacement.competence_date,
            is_paid: replacement.is_paid,
            observation: replacement.observation,
            is_recurring: replacement.is_recurring,
            recurring_type: replacement.recurring_type,
            installments: replacement.installments,
            current_installment: replacement.current_installment,
            parent_transaction_id: replacement.parent_transaction_id,
            transfer_id: replacement.transfer_id,
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().naive_utc(),
            deleted_at: replacement.deleted_at,
        }
    }

    pub fn into_domain(self) -> Result<Transaction> {
        Ok(Transaction {
            id: self.id,
            user_id: self.user_id,
            description: self.description,
            amount: self.amount,
            transaction_type: self.transaction_type.parse()?,
            category_id: self.category_id,
            account_id: self.account_id,
            due_date: self.due_date,
            competence_date: self.competence_date,
            is_paid: self.is_paid,
            observation: self.observation,
            is_recurring: self.is_recurring,
            recurring_type: self.recurring_type,
            installments: self.installments,
            current_installment: self.current_installment,
            parent_transaction_id: self.parent_transaction_id,
            transfer_id: self.transfer_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

/// Changeset for partial updates. `None` leaves a column alone; for the
/// nullable columns `Some(None)` writes NULL.
#[derive(AsChangeset, Default, Debug)]
#[diesel(table_name = crate::schema::transactions)]
pub struct TransactionChangesDB {
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub transaction_type: Option<String>,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub competence_date: Option<NaiveDate>,
    pub is_paid: Option<bool>,
    pub observation: Option<Option<String>>,
    pub is_recurring: Option<bool>,
    pub recurring_type: Option<Option<String>>,
    pub installments: Option<i32>,
    pub current_installment: Option<i32>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<TransactionUpdate> for TransactionChangesDB {
    fn from(update: TransactionUpdate) -> Self {
        Self {
            description: update.description,
            amount: update.amount,
            transaction_type: update
                .transaction_type
                .map(|t| t.as_str().to_string()),
            category_id: update.category_id,
            account_id: update.account_id,
            due_date: update.due_date,
            competence_date: update.competence_date,
            is_paid: update.is_paid,
            observation: update.observation,
            is_recurring: update.is_recurring,
            recurring_type: update.recurring_type,
            installments: update.installments,
            current_installment: update.current_installment,
            updated_at: Some(chrono::Utc::now().naive_utc()),
        }
    }
}
