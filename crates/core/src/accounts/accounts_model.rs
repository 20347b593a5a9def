//! Account domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::accounts_constants::{DEFAULT_EXPENSE_CATEGORY, DEFAULT_INCOME_CATEGORY};
use crate::categories::CategoryType;
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::TransactionType;

/// Semantic type of an account. This only selects the default category
/// pairing for the opening balance; it is not a sign constraint on the
/// account's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Income,
    Expense,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Income => "income",
            AccountType::Expense => "expense",
        }
    }

    /// The by-convention category name and transaction type used when
    /// seeding the opening balance.
    pub fn bootstrap_convention(&self) -> (&'static str, CategoryType, TransactionType) {
        match self {
            AccountType::Income => (
                DEFAULT_INCOME_CATEGORY,
                CategoryType::Income,
                TransactionType::Income,
            ),
            AccountType::Expense => (
                DEFAULT_EXPENSE_CATEGORY,
                CategoryType::Expense,
                TransactionType::Expense,
            ),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "income" => Ok(AccountType::Income),
            "expense" => Ok(AccountType::Expense),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown account type: {other}"
            ))),
        }
    }
}

/// Domain model representing an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<NaiveDateTime>,
}

/// Input model for creating an account.
///
/// `initial_value` is expressed in major currency units; the bootstrap
/// converts it to cents when seeding the opening-balance transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub initial_value: Decimal,
    pub due_date: NaiveDate,
    pub competence_date: NaiveDate,
}

fn default_true() -> bool {
    true
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency cannot be empty".to_string(),
            )));
        }
        if self.initial_value < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Initial value must not be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an account.
///
/// When both bootstrap dates are supplied the opening-balance transaction
/// is updated in place (or created when absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub initial_value: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub competence_date: Option<NaiveDate>,
}

impl AccountUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        if self.initial_value.is_some_and(|value| value < Decimal::ZERO) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Initial value must not be negative".to_string(),
            )));
        }
        Ok(())
    }
}
