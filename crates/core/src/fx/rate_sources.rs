//! Rate source implementations.
//!
//! `ExchangeRateApiSource` talks to the live exchangerate-api.com pair
//! endpoint; `FixedRateSource` serves a deterministic table for
//! environments without network access.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::fx_errors::FxError;
use super::fx_model::RateQuote;
use super::fx_traits::RateSourceTrait;
use crate::errors::Result;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
const PROVIDER_BASE_URL: &str = "https://v6.exchangerate-api.com";

/// Deterministic rate table.
pub struct FixedRateSource {
    rates: HashMap<(String, String), Decimal>,
}

impl Default for FixedRateSource {
    fn default() -> Self {
        let pairs = [
            ("BRL", "USD", dec!(0.20)),
            ("USD", "BRL", dec!(5.00)),
            ("BRL", "EUR", dec!(0.18)),
            ("EUR", "BRL", dec!(5.56)),
            ("USD", "EUR", dec!(0.85)),
            ("EUR", "USD", dec!(1.18)),
        ];
        let rates = pairs
            .into_iter()
            .map(|(from, to, rate)| ((from.to_string(), to.to_string()), rate))
            .collect();
        Self { rates }
    }
}

#[async_trait]
impl RateSourceTrait for FixedRateSource {
    async fn get_rate(&self, from: &str, to: &str, amount: Decimal) -> Result<RateQuote> {
        if from == to {
            return Ok(RateQuote {
                rate: Decimal::ONE,
                converted_amount: amount,
            });
        }
        let rate = self
            .rates
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .ok_or_else(|| FxError::RateNotFound(format!("{}/{}", from, to)))?;
        Ok(RateQuote {
            rate,
            converted_amount: amount * rate,
        })
    }
}

/// Live rate source backed by the exchangerate-api.com v6 pair endpoint.
pub struct ExchangeRateApiSource {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

/// Relevant subset of the provider's pair-conversion payload.
#[derive(Debug, Deserialize)]
struct PairResponse {
    result: String,
    #[serde(default)]
    conversion_rate: Decimal,
    #[serde(default)]
    conversion_result: Decimal,
}

impl ExchangeRateApiSource {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, PROVIDER_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .map_err(|e| FxError::Provider(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl RateSourceTrait for ExchangeRateApiSource {
    async fn get_rate(&self, from: &str, to: &str, amount: Decimal) -> Result<RateQuote> {
        if from == to {
            return Ok(RateQuote {
                rate: Decimal::ONE,
                converted_amount: amount,
            });
        }

        let url = format!(
            "{}/v6/{}/pair/{}/{}/{}",
            self.base_url, self.api_key, from, to, amount
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FxError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FxError::Provider(format!(
                "provider returned status {}",
                response.status()
            ))
            .into());
        }

        let payload: PairResponse = response
            .json()
            .await
            .map_err(|e| FxError::Provider(e.to_string()))?;

        if payload.result != "success" {
            return Err(FxError::Provider(format!(
                "provider returned result '{}'",
                payload.result
            ))
            .into());
        }

        Ok(RateQuote {
            rate: payload.conversion_rate,
            converted_amount: payload.conversion_result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_table_resolves_known_pairs() {
        let source = FixedRateSource::default();
        let quote = source.get_rate("USD", "BRL", dec!(10)).await.unwrap();
        assert_eq!(quote.rate, dec!(5.00));
        assert_eq!(quote.converted_amount, dec!(50.00));
    }

    #[tokio::test]
    async fn fixed_table_same_currency_never_fails() {
        let source = FixedRateSource::default();
        let quote = source.get_rate("JPY", "JPY", dec!(7)).await.unwrap();
        assert_eq!(quote.rate, Decimal::ONE);
        assert_eq!(quote.converted_amount, dec!(7));
    }

    #[tokio::test]
    async fn fixed_table_rejects_unknown_pair() {
        let source = FixedRateSource::default();
        let err = source.get_rate("GBP", "JPY", dec!(1)).await.unwrap_err();
        assert!(matches!(err, crate::Error::Fx(FxError::RateNotFound(_))));
    }
}
