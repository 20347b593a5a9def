//! Environment-driven configuration with local-development defaults.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub database_path: String,
    pub jwt_secret: String,
    pub cors_origin: String,
    /// When absent the deterministic fixed rate table is used instead of
    /// the live provider.
    pub exchange_api_key: Option<String>,
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        let port = get_env("PORT", "8080");
        Self {
            listen_addr: get_env("CAIXA_LISTEN_ADDR", &format!("0.0.0.0:{port}")),
            database_path: get_env("CAIXA_DB_PATH", "caixa.sqlite3"),
            jwt_secret: get_env("CAIXA_JWT_SECRET", "dev-secret-change-me"),
            cors_origin: get_env("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            exchange_api_key: env::var("EXCHANGE_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}
