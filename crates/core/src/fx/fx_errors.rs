use thiserror::Error;

/// Errors raised while resolving exchange rates.
#[derive(Error, Debug)]
pub enum FxError {
    /// The active rate source has no rate for the requested pair.
    #[error("Exchange rate not found for {0}")]
    RateNotFound(String),

    /// The external rate provider failed (transport, HTTP status or payload).
    #[error("Rate provider error: {0}")]
    Provider(String),

    /// A caller-supplied manual rate is unusable.
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),
}
