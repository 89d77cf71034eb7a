//! Shared test harness.
//!
//! Spawns the portal on an ephemeral port with in-memory collaborators and
//! hands tests a client plus direct handles on the fakes, so they can seed
//! case records and assert on recorded API calls and session state.

pub mod client;
pub mod factory;

use std::sync::Arc;

use provider_portal::api::routes::create_router;
use provider_portal::infrastructure::{
    AppConfig, AppDependencies, CaseApiClient, HtmlTemplateRenderer, InMemoryCaseApiClient,
    InMemorySessionStore, SessionStore,
};
use tokio::net::TcpListener;

use client::TestClient;

/// A running portal instance backed by in-memory fakes.
pub struct TestApp {
    pub client: TestClient,
    pub case_api: Arc<InMemoryCaseApiClient>,
    pub sessions: Arc<InMemorySessionStore>,
}

/// Starts the portal on an ephemeral port.
pub async fn spawn_app() -> TestApp {
    let case_api = Arc::new(InMemoryCaseApiClient::new());
    let sessions = Arc::new(InMemorySessionStore::new());

    let dependencies = AppDependencies::new(
        AppConfig::for_testing("http://127.0.0.1:9"),
        Arc::clone(&case_api) as Arc<dyn CaseApiClient>,
        Arc::clone(&sessions) as Arc<dyn SessionStore>,
        Arc::new(HtmlTemplateRenderer::new()),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let address = listener.local_addr().expect("listener has no local addr");

    let app = create_router(dependencies);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    TestApp {
        client: TestClient::new(format!("http://{address}")),
        case_api,
        sessions,
    }
}
