//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use caixa_core::accounts::{Account, AccountUpdate, NewAccount};
use caixa_core::errors::Result;

/// Database model for accounts.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub color: Option<String>,
    pub account_type: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl AccountDB {
    /// Materializes a row for insertion, stamping id and timestamps.
    pub fn from_new(new_account: NewAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: new_account
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: new_account.user_id,
            name: new_account.name,
            currency: new_account.currency,
            color: new_account.color,
            account_type: new_account.account_type.as_str().to_string(),
            is_active: new_account.is_active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Applies an update on top of the stored row, preserving identity
    /// fields and stamping `updated_at`.
    pub fn apply_update(existing: Self, update: AccountUpdate) -> Self {
        Self {
            id: existing.id,
            user_id: existing.user_id,
            name: update.name,
            currency: update.currency,
            color: update.color,
            account_type: update.account_type.as_str().to_string(),
            is_active: update.is_active,
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().naive_utc(),
            deleted_at: existing.deleted_at,
        }
    }

    pub fn into_domain(self) -> Result<Account> {
        Ok(Account {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            currency: self.currency,
            color: self.color,
            account_type: self.account_type.parse()?,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
