use caixa_server::api::app_router;
use caixa_server::config::Config;
use caixa_server::state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; the environment itself still applies.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caixa_server=debug,tower_http=debug,info".into()),
        )
        .init();

    let config = Config::from_env();
    let state = build_state(&config).await?;

    let router = app_router(state, &config);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
