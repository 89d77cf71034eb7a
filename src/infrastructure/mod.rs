//! Infrastructure layer: configuration, collaborators, and their concrete
//! implementations.

pub mod case_api;
pub mod config;
pub mod dependencies;
pub mod renderer;
pub mod session;

pub use case_api::{
    ApiEnvelope, ApiStatus, CaseApiClient, CaseApiError, HttpCaseApiClient, InMemoryCaseApiClient,
};
pub use config::{AppConfig, ConfigError};
pub use dependencies::AppDependencies;
pub use renderer::{HtmlTemplateRenderer, RenderError, TemplateRenderer};
pub use session::{InMemorySessionStore, SessionStore, snapshot_key};
