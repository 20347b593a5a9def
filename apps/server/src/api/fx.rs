use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{invalid, ApiResult};
use crate::state::AppState;

const SUPPORTED_CURRENCIES: &[&str] = &["BRL", "USD", "EUR", "GBP", "JPY", "CAD", "AUD"];

#[derive(Debug, Deserialize)]
struct RateQuery {
    from: String,
    to: String,
    amount: Option<Decimal>,
}

async fn exchange_rate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RateQuery>,
) -> ApiResult<impl IntoResponse> {
    for currency in [&query.from, &query.to] {
        if !SUPPORTED_CURRENCIES.contains(&currency.as_str()) {
            return Err(invalid(format!("Unsupported currency: {currency}")));
        }
    }

    let amount = query.amount.unwrap_or(Decimal::ONE);
    let conversion = state
        .fx_service
        .convert(&query.from, &query.to, amount, None)
        .await?;
    Ok(Json(conversion))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/exchange-rate", get(exchange_rate))
}
