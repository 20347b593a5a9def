use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use caixa_core::accounts::{Account, AccountRepositoryTrait, AccountUpdate, NewAccount};
use caixa_core::errors::{Error, Result, ValidationError};

use super::model::AccountDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;

/// Repository for managing account rows.
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.writer
            .exec(move |conn| {
                let row = AccountDB::from_new(new_account);
                diesel::insert_into(accounts::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                row.into_domain()
            })
            .await
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        self.writer
            .exec(move |conn| {
                let account_id = account_update
                    .id
                    .clone()
                    .ok_or(Error::Validation(ValidationError::MissingField(
                        "id".to_string(),
                    )))?;

                let existing = accounts::table
                    .find(&account_id)
                    .filter(accounts::user_id.eq(&account_update.user_id))
                    .filter(accounts::deleted_at.is_null())
                    .select(AccountDB::as_select())
                    .first::<AccountDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::NotFound(format!("account {account_id}")))?;

                let row = AccountDB::apply_update(existing, account_update);
                diesel::update(accounts::table.find(&account_id))
                    .set(&row)
                    .execute(conn)
                    .into_core()?;

                row.into_domain()
            })
            .await
    }

    async fn soft_delete(&self, account_id: &str, user_id: &str) -> Result<()> {
        let account_id = account_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = chrono::Utc::now().naive_utc();
                diesel::update(
                    accounts::table
                        .find(&account_id)
                        .filter(accounts::user_id.eq(&user_id))
                        .filter(accounts::deleted_at.is_null()),
                )
                .set((
                    accounts::deleted_at.eq(Some(now)),
                    accounts::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?;
                Ok(())
            })
            .await
    }

    fn get_by_id(&self, account_id: &str, user_id: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let row = accounts::table
            .find(account_id)
            .filter(accounts::user_id.eq(user_id))
            .filter(accounts::deleted_at.is_null())
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?;

        row.map(AccountDB::into_domain).transpose()
    }

    fn list(&self, user_id: &str) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = accounts::table
            .filter(accounts::user_id.eq(user_id))
            .filter(accounts::deleted_at.is_null())
            .select(AccountDB::as_select())
            .order(accounts::name.asc())
            .load::<AccountDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(AccountDB::into_domain).collect()
    }
}
