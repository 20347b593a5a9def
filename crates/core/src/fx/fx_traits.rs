//! FX rate source and service traits.
//!
//! `RateSourceTrait` is the replaceable collaborator behind the conversion
//! resolver: a live HTTP-backed implementation and a deterministic
//! fixed-table implementation are interchangeable behind it.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::fx_model::{Conversion, RateQuote};
use crate::errors::Result;

/// Contract for an external exchange-rate source.
#[async_trait]
pub trait RateSourceTrait: Send + Sync {
    /// Resolves the rate for `from`/`to` and converts `amount` (major units).
    async fn get_rate(&self, from: &str, to: &str, amount: Decimal) -> Result<RateQuote>;
}

/// Contract for the currency conversion resolver.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Converts `amount` (major units) from one currency to another.
    ///
    /// A supplied `manual_rate` short-circuits the rate source. Identical
    /// currencies always resolve to a rate of 1. Rate source failures
    /// propagate; they are never silently defaulted.
    async fn convert(
        &self,
        from_currency: &str,
        to_currency: &str,
        amount: Decimal,
        manual_rate: Option<Decimal>,
    ) -> Result<Conversion>;
}
