//! OFX import models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::TransactionType;

/// A raw statement record extracted from an OFX file.
///
/// `amount` keeps the statement's sign; the import derives the transaction
/// type from it and stores the absolute value.
#[derive(Debug, Clone, PartialEq)]
pub struct OfxRecord {
    pub external_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub memo: String,
}

/// A parsed record prepared for user review before import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfxPreviewEntry {
    pub external_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub memo: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// Aggregate outcome of an import run. One bad record never fails the
/// batch; it lands here instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}
