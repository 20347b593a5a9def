use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::fx_errors::FxError;
use super::fx_model::Conversion;
use super::fx_traits::{FxServiceTrait, RateSourceTrait};
use crate::errors::Result;

/// Currency conversion resolver.
///
/// Resolves a rate from either a caller-supplied manual override or the
/// configured rate source, and applies it to the given amount.
#[derive(Clone)]
pub struct FxService {
    source: Arc<dyn RateSourceTrait>,
}

impl FxService {
    pub fn new(source: Arc<dyn RateSourceTrait>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn convert(
        &self,
        from_currency: &str,
        to_currency: &str,
        amount: Decimal,
        manual_rate: Option<Decimal>,
    ) -> Result<Conversion> {
        if from_currency == to_currency {
            return Ok(Conversion {
                from_currency: from_currency.to_string(),
                to_currency: to_currency.to_string(),
                rate: Decimal::ONE,
                converted_amount: amount,
            });
        }

        if let Some(rate) = manual_rate {
            if rate <= Decimal::ZERO {
                return Err(FxError::InvalidRate(rate.to_string()).into());
            }
            debug!(
                "converting {} {}->{} with manual rate {}",
                amount, from_currency, to_currency, rate
            );
            return Ok(Conversion {
                from_currency: from_currency.to_string(),
                to_currency: to_currency.to_string(),
                rate,
                converted_amount: amount * rate,
            });
        }

        let quote = self.source.get_rate(from_currency, to_currency, amount).await?;
        Ok(Conversion {
            from_currency: from_currency.to_string(),
            to_currency: to_currency.to_string(),
            rate: quote.rate,
            converted_amount: quote.converted_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::rate_sources::FixedRateSource;
    use rust_decimal_macros::dec;

    fn service() -> FxService {
        FxService::new(Arc::new(FixedRateSource::default()))
    }

    #[tokio::test]
    async fn same_currency_is_identity() {
        let conversion = service()
            .convert("BRL", "BRL", dec!(123.45), None)
            .await
            .unwrap();
        assert_eq!(conversion.rate, Decimal::ONE);
        assert_eq!(conversion.converted_amount, dec!(123.45));
    }

    #[tokio::test]
    async fn manual_rate_overrides_lookup() {
        // XYZ is unknown to the fixed table; the manual rate must win
        // without ever consulting the source.
        let conversion = service()
            .convert("BRL", "XYZ", dec!(100), Some(dec!(0.25)))
            .await
            .unwrap();
        assert_eq!(conversion.rate, dec!(0.25));
        assert_eq!(conversion.converted_amount, dec!(25));
    }

    #[tokio::test]
    async fn manual_rate_must_be_positive() {
        let err = service()
            .convert("BRL", "USD", dec!(100), Some(dec!(0)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Fx(FxError::InvalidRate(_))
        ));
    }

    #[tokio::test]
    async fn falls_back_to_rate_source() {
        let conversion = service()
            .convert("BRL", "USD", dec!(100), None)
            .await
            .unwrap();
        assert_eq!(conversion.rate, dec!(0.20));
        assert_eq!(conversion.converted_amount, dec!(20.00));
    }

    #[tokio::test]
    async fn unknown_pair_propagates_error() {
        let err = service()
            .convert("BRL", "CHF", dec!(10), None)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Fx(FxError::RateNotFound(_))));
    }
}
