use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use super::transfers_errors::TransferError;
use super::transfers_model::{ExchangeInfo, TransferOutcome, TransferRequest};
use crate::accounts::AccountRepositoryTrait;
use crate::categories::CategoryServiceTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::fx::FxServiceTrait;
use crate::transactions::{NewTransaction, TransactionRepositoryTrait, TransactionType};

/// Orchestrates the transfer workflow: resolves both accounts, converts
/// currency when needed, and persists the linked debit/credit pair.
pub struct TransferService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
}

impl TransferService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
    ) -> Self {
        Self {
            account_repository,
            category_service,
            transaction_repository,
            fx_service,
        }
    }

    /// Creates a transfer between two accounts of the same user.
    ///
    /// The debit side carries the original amount on the source account,
    /// the credit side the (possibly converted) amount on the destination
    /// account, and both share a freshly generated transfer id. The pair is
    /// persisted atomically.
    pub async fn create_transfer(&self, request: TransferRequest) -> Result<TransferOutcome> {
        request.validate()?;

        let source = self
            .account_repository
            .get_by_id(&request.source_account_id, &request.user_id)?
            .ok_or_else(|| TransferError::OriginAccountNotFound(request.source_account_id.clone()))?;
        let destination = self
            .account_repository
            .get_by_id(&request.destination_account_id, &request.user_id)?
            .ok_or_else(|| {
                TransferError::DestinationAccountNotFound(request.destination_account_id.clone())
            })?;

        let transfer_category = self.category_service.get_or_create_transfer_category().await?;
        let transfer_id = Uuid::new_v4().to_string();

        let exchange_info = if source.currency != destination.currency {
            let amount_major = Decimal::from(request.amount) / Decimal::ONE_HUNDRED;
            let conversion = self
                .fx_service
                .convert(
                    &source.currency,
                    &destination.currency,
                    amount_major,
                    request.manual_rate,
                )
                .await?;
            let converted_amount = (conversion.converted_amount * Decimal::ONE_HUNDRED)
                .round()
                .to_i64()
                .ok_or_else(|| {
                    Error::Validation(ValidationError::InvalidInput(format!(
                        "converted amount {} is out of range",
                        conversion.converted_amount
                    )))
                })?;
            Some(ExchangeInfo {
                from_currency: source.currency.clone(),
                to_currency: destination.currency.clone(),
                exchange_rate: conversion.rate,
                original_amount: request.amount,
                converted_amount,
            })
        } else {
            None
        };

        let credit_amount = exchange_info
            .as_ref()
            .map(|info| info.converted_amount)
            .unwrap_or(request.amount);
        let observation = annotate_observation(request.observation.clone(), exchange_info.as_ref());

        let debit = NewTransaction {
            id: None,
            user_id: request.user_id.clone(),
            description: request.description.clone(),
            amount: request.amount,
            transaction_type: TransactionType::Expense,
            category_id: transfer_category.id.clone(),
            account_id: request.source_account_id.clone(),
            due_date: request.due_date,
            competence_date: request.competence_date,
            is_paid: request.is_paid,
            observation: observation.clone(),
            is_recurring: request.is_recurring,
            recurring_type: request.recurring_type.clone(),
            installments: request.installments,
            current_installment: request.current_installment,
            parent_transaction_id: request.parent_transaction_id.clone(),
            transfer_id: Some(transfer_id.clone()),
        };

        let credit = NewTransaction {
            id: None,
            user_id: request.user_id.clone(),
            description: request.description.clone(),
            amount: credit_amount,
            transaction_type: TransactionType::Income,
            category_id: transfer_category.id,
            account_id: request.destination_account_id.clone(),
            due_date: request.due_date,
            competence_date: request.competence_date,
            is_paid: request.is_paid,
            observation,
            is_recurring: request.is_recurring,
            recurring_type: request.recurring_type,
            installments: request.installments,
            current_installment: request.current_installment,
            parent_transaction_id: request.parent_transaction_id,
            transfer_id: Some(transfer_id.clone()),
        };

        let (debit_transaction, credit_transaction) =
            self.transaction_repository.create_pair(debit, credit).await?;

        debug!(
            "transfer {} created: {} {} from {} to {}",
            transfer_id, request.amount, source.currency, source.id, destination.id
        );

        Ok(TransferOutcome {
            debit_transaction,
            credit_transaction,
            transfer_id,
            exchange_info,
        })
    }
}

/// Appends the conversion note to the user-supplied observation.
fn annotate_observation(
    observation: Option<String>,
    exchange_info: Option<&ExchangeInfo>,
) -> Option<String> {
    let Some(info) = exchange_info else {
        return observation;
    };
    let note = format!(
        "Câmbio: {:.4} {}/{}",
        info.exchange_rate, info.from_currency, info.to_currency
    );
    match observation.filter(|o| !o.is_empty()) {
        Some(existing) => Some(format!("{existing} | {note}")),
        None => Some(note),
    }
}
