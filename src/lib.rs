//! Provider Portal
//!
//! Server-rendered case-management portal for legal-aid providers. Every
//! page is an edit form over a case record held by a remote case API: GET
//! shows the current values, POST validates the submission against what
//! the user was shown and applies the update.
//!
//! # Architecture
//!
//! The crate follows the Onion Architecture:
//!
//! - **Domain Layer**: field descriptors, case references, validation error
//!   records
//! - **Application Layer**: extraction, change detection, validation,
//!   error ranking, and the static per-form catalog
//! - **Infrastructure Layer**: configuration, case API client, session
//!   snapshot store, renderer
//! - **API Layer**: routes, the generic edit-form controller, context
//!   assembly, error mapping
//!
//! # The edit-form pipeline
//!
//! One generic controller serves every form. A [`application::FormConfig`]
//! names the fields, the validation rules, the summary priorities, the
//! update payload shape, and the case API operation; adding a form is a
//! catalog entry plus two thin handlers.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use api::create_router;
pub use infrastructure::{AppConfig, AppDependencies};
