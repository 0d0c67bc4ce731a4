mod error;
mod format;
mod render;
mod routes;
mod services;
mod state;
mod store;

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = match std::env::var("PORT") {
        Ok(raw) => match raw.trim().parse::<u16>() {
            Ok(port) => port,
            Err(e) => {
                tracing::error!(value = %raw, error = %e, "invalid PORT");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => DEFAULT_PORT,
    };

    let (store, config) = match store::StoreClient::from_env() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "store client not configured");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(url = store.rest_url(), schema = %config.schema, claims_table = %config.claims_table, "store client initialized");

    let settings = state::DashboardSettings::from_config(&config);
    let state = state::AppState::new(Arc::new(store), settings);

    let app = routes::app(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%port, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%port, "claimboard listening");
    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    tracing::info!("claimboard stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
