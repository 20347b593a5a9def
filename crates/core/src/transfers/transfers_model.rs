//! Transfer domain models.
//!
//! `TransferRequest` is a dedicated shape with explicit source and
//! destination account fields; transfers are never expressed by
//! repurposing a plain transaction's category field.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::transactions::Transaction;

/// Request to move money between two accounts of the same user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub user_id: String,
    pub source_account_id: String,
    pub destination_account_id: String,
    /// Debit-side amount in minor units of the source currency.
    pub amount: i64,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub competence_date: NaiveDate,
    #[serde(default)]
    pub is_paid: bool,
    pub observation: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_type: Option<String>,
    pub installments: i32,
    pub current_installment: i32,
    pub parent_transaction_id: Option<String>,
    /// Caller-supplied rate overriding the rate source lookup.
    pub manual_rate: Option<Decimal>,
}

impl TransferRequest {
    pub fn validate(&self) -> Result<()> {
        if self.amount < 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transfer amount must not be negative".to_string(),
            )));
        }
        if self.source_account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "source_account_id".to_string(),
            )));
        }
        if self.destination_account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "destination_account_id".to_string(),
            )));
        }
        Ok(())
    }
}

/// Conversion metadata attached to a cross-currency transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    pub from_currency: String,
    pub to_currency: String,
    pub exchange_rate: Decimal,
    /// Debit-side amount in minor units of the source currency.
    pub original_amount: i64,
    /// Credit-side amount in minor units of the destination currency.
    pub converted_amount: i64,
}

/// The persisted result of a transfer: a linked expense/income pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub debit_transaction: Transaction,
    pub credit_transaction: Transaction,
    pub transfer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_info: Option<ExchangeInfo>,
}
