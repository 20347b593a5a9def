//! FX module - currency conversion resolver and rate sources.

mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;
mod rate_sources;

pub use fx_errors::FxError;
pub use fx_model::{Conversion, RateQuote};
pub use fx_service::FxService;
pub use fx_traits::{FxServiceTrait, RateSourceTrait};
pub use rate_sources::{ExchangeRateApiSource, FixedRateSource};
