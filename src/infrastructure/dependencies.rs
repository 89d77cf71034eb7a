//! Dependency injection container.
//!
//! All collaborators the handlers need are assembled once at startup and
//! carried through axum state. Handlers depend only on the trait objects,
//! so tests swap in in-memory implementations without touching routing.

use std::sync::Arc;

use super::case_api::CaseApiClient;
use super::config::AppConfig;
use super::renderer::TemplateRenderer;
use super::session::SessionStore;

/// Issues one-time tokens embedded in rendered forms.
pub type CsrfTokenSource = Arc<dyn Fn() -> String + Send + Sync>;

/// Container for application dependencies.
#[derive(Clone)]
pub struct AppDependencies {
    config: AppConfig,
    case_api: Arc<dyn CaseApiClient>,
    sessions: Arc<dyn SessionStore>,
    renderer: Arc<dyn TemplateRenderer>,
    csrf_tokens: Option<CsrfTokenSource>,
}

impl AppDependencies {
    /// Assembles the container.
    #[must_use]
    pub fn new(
        config: AppConfig,
        case_api: Arc<dyn CaseApiClient>,
        sessions: Arc<dyn SessionStore>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            config,
            case_api,
            sessions,
            renderer,
            csrf_tokens: None,
        }
    }

    /// Attaches a CSRF token source; without one, forms render no token.
    #[must_use]
    pub fn with_csrf_tokens(mut self, source: CsrfTokenSource) -> Self {
        self.csrf_tokens = Some(source);
        self
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The case API client.
    #[must_use]
    pub fn case_api(&self) -> &dyn CaseApiClient {
        self.case_api.as_ref()
    }

    /// The session snapshot store.
    #[must_use]
    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    /// The page renderer.
    #[must_use]
    pub fn renderer(&self) -> &dyn TemplateRenderer {
        self.renderer.as_ref()
    }

    /// A fresh CSRF token, when a source is attached.
    #[must_use]
    pub fn issue_csrf_token(&self) -> Option<String> {
        self.csrf_tokens.as_ref().map(|source| source())
    }
}
