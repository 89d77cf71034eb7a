//! The generic edit-form controller.
//!
//! One GET path and one POST path drive every edit form; the per-form
//! behaviour lives entirely in the static [`FormConfig`] catalog.
//!
//! # GET
//!
//! Parse the case reference, fetch the case record, extract the form's
//! current values, write the snapshot into the session, render.
//!
//! # POST
//!
//! Parse the reference, wrap the urlencoded pairs, validate against the
//! round-tripped baseline (hidden `existing*` inputs first, session
//! snapshot as fallback). On any error the form re-renders with status 400
//! and no API call is made. On success the form's payload is sent to its
//! update operation, the snapshot is cleared, and the user is redirected to
//! the case details page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::{Map, Value};

use crate::api::middleware::PortalError;
use crate::api::render::{current_values_context, failed_submission_context};
use crate::application::{FormConfig, FormSubmission, UpdateOperation};
use crate::domain::CaseReference;
use crate::infrastructure::case_api::{ApiEnvelope, CaseApiClient, CaseApiError};
use crate::infrastructure::dependencies::AppDependencies;
use crate::infrastructure::session::snapshot_key;

/// Renders an edit form pre-populated from the case record.
///
/// # Errors
///
/// Fails when the reference is invalid, the case cannot be fetched, or
/// rendering fails.
pub async fn show_edit_form(
    dependencies: &AppDependencies,
    form: &'static FormConfig,
    raw_reference: &str,
) -> Result<Html<String>, PortalError> {
    show_edit_form_with(dependencies, form, raw_reference, Map::new()).await
}

/// [`show_edit_form`] with extra template values merged into the context
/// (used by forms that render reference data, like feedback choices).
///
/// # Errors
///
/// Same failure modes as [`show_edit_form`].
pub async fn show_edit_form_with(
    dependencies: &AppDependencies,
    form: &'static FormConfig,
    raw_reference: &str,
    extras: Map<String, Value>,
) -> Result<Html<String>, PortalError> {
    let reference = CaseReference::parse(raw_reference)?;
    let record = fetch_case_record(dependencies, &reference).await?;

    let extracted = form.extract(&record);
    dependencies.sessions().write(
        &snapshot_key(&reference, form),
        Value::Object(extracted.snapshot),
    );

    let token = dependencies.issue_csrf_token();
    let context = current_values_context(&reference, token.as_deref(), extracted.render, extras);
    let page = dependencies.renderer().render(form.template, &context)?;

    tracing::debug!(case = %reference, form = form.name, "edit form rendered");
    Ok(Html(page))
}

/// Validates a submission and either re-renders with errors or applies the
/// form's update operation and redirects.
///
/// # Errors
///
/// Fails when the reference is invalid, the case API fails, or rendering
/// fails. Validation errors are not an `Err`: they re-render the form with
/// status 400.
pub async fn submit_edit_form(
    dependencies: &AppDependencies,
    form: &'static FormConfig,
    raw_reference: &str,
    pairs: Vec<(String, String)>,
) -> Result<Response, PortalError> {
    submit_edit_form_with(dependencies, form, raw_reference, pairs, Map::new()).await
}

/// [`submit_edit_form`] with extra template values for the failure
/// re-render, so forms that show reference data on GET show it again when
/// the submission is rejected.
///
/// # Errors
///
/// Same failure modes as [`submit_edit_form`].
pub async fn submit_edit_form_with(
    dependencies: &AppDependencies,
    form: &'static FormConfig,
    raw_reference: &str,
    pairs: Vec<(String, String)>,
    extras: Map<String, Value>,
) -> Result<Response, PortalError> {
    let reference = CaseReference::parse(raw_reference)?;
    let submission = FormSubmission::new(pairs);
    let key = snapshot_key(&reference, form);

    let snapshot = dependencies
        .sessions()
        .read(&key)
        .and_then(|value| value.as_object().cloned());

    let errors = form.validator().validate(&submission, snapshot.as_ref());
    if !errors.is_empty() {
        tracing::debug!(
            case = %reference,
            form = form.name,
            errors = errors.len(),
            "submission rejected"
        );
        let token = dependencies.issue_csrf_token();
        let context = failed_submission_context(
            &reference,
            token.as_deref(),
            form,
            &submission,
            errors,
            extras,
        );
        let page = dependencies.renderer().render(form.template, &context)?;
        return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
    }

    let payload = (form.payload)(&submission);
    let envelope =
        apply_update(dependencies.case_api(), form.operation, &reference, &payload).await?;

    if !envelope.is_success() {
        return Err(PortalError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "The update was not accepted".to_string()),
        ));
    }

    dependencies.sessions().delete(&key);
    tracing::info!(case = %reference, form = form.name, "update accepted");

    Ok(Redirect::to(&format!("/cases/{reference}/client-details")).into_response())
}

async fn fetch_case_record(
    dependencies: &AppDependencies,
    reference: &CaseReference,
) -> Result<Value, PortalError> {
    let envelope = dependencies.case_api().get_client_details(reference).await?;
    if !envelope.is_success() {
        return Err(PortalError::CaseNotFound(reference.to_string()));
    }
    Ok(envelope.data.unwrap_or(Value::Null))
}

/// Routes a validated submission to its case API write.
///
/// Third-party deletion is idempotent: a 404 from the case API means the
/// contact is already gone, which is the outcome the user asked for.
async fn apply_update(
    case_api: &dyn CaseApiClient,
    operation: UpdateOperation,
    reference: &CaseReference,
    payload: &Value,
) -> Result<ApiEnvelope, CaseApiError> {
    match operation {
        UpdateOperation::UpdateClientDetails => {
            case_api.update_client_details(reference, payload).await
        }
        UpdateOperation::UpdateProviderNotes => {
            case_api.update_provider_notes(reference, payload).await
        }
        UpdateOperation::AddThirdPartyContact => {
            case_api.add_third_party_contact(reference, payload).await
        }
        UpdateOperation::UpdateClientSupportNeeds => {
            case_api.update_client_support_needs(reference, payload).await
        }
        UpdateOperation::DeleteThirdPartyContact => {
            match case_api.delete_third_party_contact(reference).await {
                Err(error) if error.is_not_found() => Ok(ApiEnvelope::accepted()),
                other => other,
            }
        }
        UpdateOperation::SubmitOperatorFeedback => {
            case_api.submit_operator_feedback(reference, payload).await
        }
    }
}
