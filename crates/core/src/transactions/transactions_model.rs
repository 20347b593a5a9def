//! Transaction domain models.
//!
//! Stored amounts are minor-currency-unit integers (cents) and are always
//! non-negative; the direction of money is carried by the transaction type,
//! never by the integer's sign.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// Direction of a transaction. Transfers are represented as a linked
/// expense/income pair and are never stored with a "transfer" type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown transaction type: {other}"
            ))),
        }
    }
}

/// Domain model for a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub description: String,
    /// Minor currency units (cents), non-negative.
    pub amount: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: String,
    pub account_id: String,
    pub due_date: NaiveDate,
    /// Accounting period date, distinct from the due date.
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<NaiveDateTime>,
}

/// Input model for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub description: String,
    pub amount: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: String,
    pub account_id: String,
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
    pub transfer_id: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.amount < 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction amount must not be negative".to_string(),
            )));
        }
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "account_id".to_string(),
            )));
        }
        if self.category_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category_id".to_string(),
            )));
        }
        Ok(())
    }
}

fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Partial update for a transaction.
///
/// Every mutable field is optional; identity fields (`id`, `user_id`,
/// `created_at`) are not representable here at all, so they can never be
/// part of an accepted field set. Nullable columns use a double `Option`:
/// outer `None` leaves the column alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub description: Option<String>,
    pub amount: Option<i64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub competence_date: Option<NaiveDate>,
    pub is_paid: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub observation: Option<Option<String>>,
    pub is_recurring: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub recurring_type: Option<Option<String>>,
    pub installments: Option<i32>,
    pub current_installment: Option<i32>,
}

impl TransactionUpdate {
    /// True when no field at all would be touched.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.transaction_type.is_none()
            && self.category_id.is_none()
            && self.account_id.is_none()
            && self.due_date.is_none()
            && self.competence_date.is_none()
            && self.is_paid.is_none()
            && self.observation.is_none()
            && self.is_recurring.is_none()
            && self.recurring_type.is_none()
            && self.installments.is_none()
            && self.current_installment.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            if amount < 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Transaction amount must not be negative".to_string(),
                )));
            }
        }
        Ok(())
    }
}
