//! FX domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A quote returned by a rate source for a currency pair and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub rate: Decimal,
    pub converted_amount: Decimal,
}

/// The outcome of resolving a conversion between two currencies.
///
/// Amounts are in major currency units; callers dealing in minor units
/// convert at their own boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Decimal,
    pub converted_amount: Decimal,
}
