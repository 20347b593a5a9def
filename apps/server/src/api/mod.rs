//! Route assembly.

mod accounts;
mod auth;
mod categories;
mod fx;
mod health;
mod ofx;
mod transactions;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::AppState;

/// Tenancy key accepted on every scoped route, per the frontend contract.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!("invalid CORS_ALLOWED_ORIGIN, falling back to a closed CORS policy");
            CorsLayer::new()
        }
    };

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(accounts::router())
        .merge(categories::router())
        .merge(transactions::router())
        .merge(fx::router())
        .merge(ofx::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
