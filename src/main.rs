//! Provider Portal entry point.
//!
//! Loads configuration from the environment, wires the HTTP case API
//! client behind the dependency container, and serves the portal until a
//! shutdown signal arrives.

use std::sync::Arc;

use provider_portal::api::routes::create_router;
use provider_portal::infrastructure::{
    AppConfig, AppDependencies, HtmlTemplateRenderer, HttpCaseApiClient, InMemorySessionStore,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,provider_portal=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Provider Portal...");

    let config = match AppConfig::from_env() {
        Ok(config) => {
            tracing::info!(
                "Configuration loaded: host={}, port={}, case_api={}",
                config.app_host,
                config.app_port,
                config.case_api_base_url
            );
            config
        }
        Err(error) => {
            tracing::error!("Failed to load configuration: {error}");
            std::process::exit(1);
        }
    };

    let bind_address = format!("{}:{}", config.app_host, config.app_port);

    let case_api = Arc::new(HttpCaseApiClient::new(
        config.case_api_base_url.clone(),
        config.case_api_token.clone(),
    ));
    let sessions = Arc::new(InMemorySessionStore::new());
    let renderer = Arc::new(HtmlTemplateRenderer::new());

    let dependencies = AppDependencies::new(config, case_api, sessions, renderer);
    let app = create_router(dependencies);

    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!("Failed to bind {bind_address}: {error}");
            std::process::exit(1);
        }
    };
    tracing::info!("Provider Portal started on http://{bind_address}");

    if let Err(error) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {error}");
        std::process::exit(1);
    }

    tracing::info!("Provider Portal stopped");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received");
}
