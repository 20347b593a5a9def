use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use caixa_core::accounts::OPENING_BALANCE_DESCRIPTION;
use caixa_core::errors::{Error, Result, ValidationError};
use caixa_core::transactions::{
    NewTransaction, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};

use super::model::{TransactionChangesDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;

/// Repository for managing transaction rows.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn| {
                let row = TransactionDB::from_new(new_transaction);
                diesel::insert_into(transactions::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                row.into_domain()
            })
            .await
    }

    async fn create_pair(
        &self,
        debit: NewTransaction,
        credit: NewTransaction,
    ) -> Result<(Transaction, Transaction)> {
        // One writer job means one immediate transaction: the pair is
        // all-or-nothing, readers can never observe a lone side.
        self.writer
            .exec(move |conn| {
                let debit_row = TransactionDB::from_new(debit);
                let credit_row = TransactionDB::from_new(credit);
                diesel::insert_into(transactions::table)
                    .values(&debit_row)
                    .execute(conn)
                    .into_core()?;
                diesel::insert_into(transactions::table)
                    .values(&credit_row)
                    .execute(conn)
                    .into_core()?;
                Ok((debit_row.into_domain()?, credit_row.into_domain()?))
            })
            .await
    }

    async fn update(
        &self,
        transaction_id: &str,
        user_id: &str,
        transaction: Transaction,
    ) -> Result<Transaction> {
        let transaction_id = transaction_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing = transactions::table
                    .find(&transaction_id)
                    .filter(transactions::user_id.eq(&user_id))
                    .select(TransactionDB::as_select())
                    .first::<TransactionDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::NotFound(format!("transaction {transaction_id}")))?;

                let row = TransactionDB::apply_replace(existing, transaction);
                diesel::update(transactions::table.find(&transaction_id))
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                row.into_domain()
            })
            .await
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

        let transaction_id = transaction_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let changes = TransactionChangesDB::from(update);
                let affected = diesel::update(
                    transactions::table
                        .find(&transaction_id)
                        .filter(transactions::user_id.eq(&user_id))
                        .filter(transactions::deleted_at.is_null()),
                )
                .set(&changes)
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("transaction {transaction_id}")));
                }

                transactions::table
                    .find(&transaction_id)
                    .select(TransactionDB::as_select())
                    .first::<TransactionDB>(conn)
                    .into_core()?
                    .into_domain()
            })
            .await
    }

    async fn soft_delete(&self, transaction_id: &str, user_id: &str) -> Result<()> {
        let transaction_id = transaction_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = chrono::Utc::now().naive_utc();
                diesel::update(
                    transactions::table
                        .find(&transaction_id)
                        .filter(transactions::user_id.eq(&user_id))
                        .filter(transactions::deleted_at.is_null()),
                )
                .set(transactions::deleted_at.eq(Some(now)))
                .execute(conn)
                .into_core()?;
                Ok(())
            })
            .await
    }

    async fn soft_delete_by_transfer_id(&self, transfer_id: &str, user_id: &str) -> Result<()> {
        let transfer_id = transfer_id.to_string();
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = chrono::Utc::now().naive_utc();
                diesel::update(
                    transactions::table
                        .filter(transactions::transfer_id.eq(&transfer_id))
                        .filter(transactions::user_id.eq(&user_id))
                        .filter(transactions::deleted_at.is_null()),
                )
                .set(transactions::deleted_at.eq(Some(now)))
                .execute(conn)
                .into_core()?;
                Ok(())
            })
            .await
    }

    fn get_by_id(&self, transaction_id: &str, user_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let row = transactions::table
            .find(transaction_id)
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::deleted_at.is_null())
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?;

        row.map(TransactionDB::into_domain).transpose()
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::deleted_at.is_null())
            .select(TransactionDB::as_select())
            .order((transactions::due_date.asc(), transactions::created_at.asc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(TransactionDB::into_domain).collect()
    }

    fn get_by_transfer_id(&self, transfer_id: &str, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transactions::table
            .filter(transactions::transfer_id.eq(transfer_id))
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::deleted_at.is_null())
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(TransactionDB::into_domain).collect()
    }

    fn has_any_for_account(&self, account_id: &str, user_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .into_core()?;
        Ok(count > 0)
    }

    fn has_any_for_category(&self, category_id: &str, user_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let count: i64 = transactions::table
            .filter(transactions::category_id.eq(category_id))
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .into_core()?;
        Ok(count > 0)
    }

    fn opening_balance_for_account(
        &self,
        account_id: &str,
        user_id: &str,
    ) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let row = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::description.eq(OPENING_BALANCE_DESCRIPTION))
            .filter(transactions::deleted_at.is_null())
            .order(transactions::created_at.asc())
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?;

        row.map(TransactionDB::into_domain).transpose()
    }
}
