//! Caixa HTTP server - a thin axum shell over the core services.
//!
//! Everything interesting lives in `caixa-core`; this crate only binds
//! requests, owns the session cookie, and translates errors to statuses.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
