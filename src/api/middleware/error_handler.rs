//! Error handling for the HTTP layer.
//!
//! Every handler returns `Result<_, PortalError>`; this module maps each
//! failure onto an HTTP status and a rendered error page. Causes are logged
//! here, once, with the mapping below.
//!
//! # Error Mapping
//!
//! | Failure | HTTP status | Page message |
//! |---------|-------------|--------------|
//! | Invalid case reference | 400 | "The case reference is not valid" |
//! | Case not found upstream | 404 | "The case could not be found" |
//! | Case API unreachable | 502 | "The case service is unavailable" |
//! | Case API 4xx/5xx | 502 | per-status message table |
//! | Case API rejected the operation | 502 | the envelope message |
//! | Rendering failed | 500 | "Sorry, there is a problem with the service" |

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::domain::CaseReferenceError;
use crate::infrastructure::case_api::CaseApiError;
use crate::infrastructure::renderer::RenderError;

/// Anything a portal handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// The case reference in the URL failed validation.
    #[error("invalid case reference")]
    InvalidCaseReference(#[from] CaseReferenceError),

    /// The case API has no record of the case.
    #[error("case not found: {0}")]
    CaseNotFound(String),

    /// The case API failed at the transport level.
    #[error("case API failure")]
    Upstream(#[from] CaseApiError),

    /// The case API answered with an error envelope.
    #[error("case API rejected the operation: {0}")]
    Rejected(String),

    /// Page rendering failed.
    #[error("rendering failure")]
    Render(#[from] RenderError),
}

/// User-facing message for an upstream HTTP status.
#[must_use]
pub const fn upstream_status_message(status: u16) -> &'static str {
    match status {
        400 => "The case service could not process the request",
        401 | 403 => "The case service refused the request",
        404 => "The case could not be found",
        408 | 504 => "The case service took too long to respond",
        503 => "The case service is temporarily unavailable",
        _ => "The case service is unavailable",
    }
}

impl PortalError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::InvalidCaseReference(_) => (
                StatusCode::BAD_REQUEST,
                "The case reference is not valid".to_string(),
            ),
            Self::CaseNotFound(_) => (
                StatusCode::NOT_FOUND,
                "The case could not be found".to_string(),
            ),
            Self::Upstream(CaseApiError::UpstreamStatus { status: 404 }) => (
                StatusCode::NOT_FOUND,
                upstream_status_message(404).to_string(),
            ),
            Self::Upstream(CaseApiError::UpstreamStatus { status }) => (
                StatusCode::BAD_GATEWAY,
                upstream_status_message(*status).to_string(),
            ),
            Self::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "The case service is unavailable".to_string(),
            ),
            Self::Rejected(message) => (StatusCode::BAD_GATEWAY, message.clone()),
            Self::Render(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Sorry, there is a problem with the service".to_string(),
            ),
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = format!(
            "<!DOCTYPE html><html lang=\"en\"><head><title>Error</title></head>\
             <body><h1>{message}</h1></body></html>"
        );
        (status, Html(body)).into_response()
    }
}
