//! Route definitions.
//!
//! Maps every portal URL to its handler. Edit forms follow one shape: GET
//! renders, POST validates and applies. The router carries the assembled
//! [`AppDependencies`] as state and traces every request.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::infrastructure::dependencies::AppDependencies;

use super::handlers::{forms, views};

/// Builds the application router.
#[must_use]
pub fn create_router(dependencies: AppDependencies) -> Router {
    Router::new()
        .route("/health", get(views::health))
        .route("/cases", get(views::list_cases))
        .route("/cases/search", get(views::search_cases))
        .route("/cases/{caseReference}/client-details", get(views::client_details))
        .route(
            "/cases/{caseReference}/client-details/client-name",
            get(forms::get_client_name).post(forms::post_client_name),
        )
        .route(
            "/cases/{caseReference}/client-details/date-of-birth",
            get(forms::get_date_of_birth).post(forms::post_date_of_birth),
        )
        .route(
            "/cases/{caseReference}/client-details/address",
            get(forms::get_address).post(forms::post_address),
        )
        .route(
            "/cases/{caseReference}/client-details/phone-number",
            get(forms::get_phone_number).post(forms::post_phone_number),
        )
        .route(
            "/cases/{caseReference}/client-details/email-address",
            get(forms::get_email_address).post(forms::post_email_address),
        )
        .route(
            "/cases/{caseReference}/client-details/provider-notes",
            get(forms::get_provider_notes).post(forms::post_provider_notes),
        )
        .route(
            "/cases/{caseReference}/client-details/third-party",
            get(forms::get_third_party).post(forms::post_third_party),
        )
        .route(
            "/cases/{caseReference}/client-details/third-party/add",
            get(forms::get_third_party_add).post(forms::post_third_party_add),
        )
        .route(
            "/cases/{caseReference}/client-details/third-party/remove",
            get(forms::get_third_party_remove).post(forms::post_third_party_remove),
        )
        .route(
            "/cases/{caseReference}/client-details/support-needs",
            get(forms::get_support_needs).post(forms::post_support_needs),
        )
        .route(
            "/cases/{caseReference}/operator-feedback",
            get(forms::get_operator_feedback).post(forms::post_operator_feedback),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(dependencies)
}
