//! Per-form route handlers.
//!
//! Each edit form contributes a GET and a POST handler that do nothing but
//! name their [`FormConfig`] and delegate to the generic controller. The
//! POST body is taken as raw urlencoded pairs so repeated keys (checkbox
//! groups) survive.

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Response};
use serde_json::{Map, Value, json};

use crate::api::middleware::PortalError;
use crate::application::catalog::{
    ADDRESS_FORM, CLIENT_NAME_FORM, DATE_OF_BIRTH_FORM, EMAIL_FORM, OPERATOR_FEEDBACK_FORM,
    PHONE_FORM, PROVIDER_NOTES_FORM, SUPPORT_NEEDS_FORM, THIRD_PARTY_ADD_FORM, THIRD_PARTY_FORM,
    THIRD_PARTY_REMOVE_FORM,
};
use crate::infrastructure::dependencies::AppDependencies;

use super::edit_form::{
    show_edit_form, show_edit_form_with, submit_edit_form, submit_edit_form_with,
};

pub async fn get_client_name(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &CLIENT_NAME_FORM, &case_reference).await
}

pub async fn post_client_name(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &CLIENT_NAME_FORM, &case_reference, pairs).await
}

pub async fn get_date_of_birth(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &DATE_OF_BIRTH_FORM, &case_reference).await
}

pub async fn post_date_of_birth(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &DATE_OF_BIRTH_FORM, &case_reference, pairs).await
}

pub async fn get_address(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &ADDRESS_FORM, &case_reference).await
}

pub async fn post_address(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &ADDRESS_FORM, &case_reference, pairs).await
}

pub async fn get_phone_number(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &PHONE_FORM, &case_reference).await
}

pub async fn post_phone_number(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &PHONE_FORM, &case_reference, pairs).await
}

pub async fn get_email_address(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &EMAIL_FORM, &case_reference).await
}

pub async fn post_email_address(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &EMAIL_FORM, &case_reference, pairs).await
}

pub async fn get_provider_notes(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &PROVIDER_NOTES_FORM, &case_reference).await
}

pub async fn post_provider_notes(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &PROVIDER_NOTES_FORM, &case_reference, pairs).await
}

pub async fn get_third_party(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &THIRD_PARTY_FORM, &case_reference).await
}

pub async fn post_third_party(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &THIRD_PARTY_FORM, &case_reference, pairs).await
}

pub async fn get_third_party_add(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &THIRD_PARTY_ADD_FORM, &case_reference).await
}

pub async fn post_third_party_add(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &THIRD_PARTY_ADD_FORM, &case_reference, pairs).await
}

pub async fn get_third_party_remove(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &THIRD_PARTY_REMOVE_FORM, &case_reference).await
}

pub async fn post_third_party_remove(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &THIRD_PARTY_REMOVE_FORM, &case_reference, pairs).await
}

pub async fn get_support_needs(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    show_edit_form(&dependencies, &SUPPORT_NEEDS_FORM, &case_reference).await
}

pub async fn post_support_needs(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    submit_edit_form(&dependencies, &SUPPORT_NEEDS_FORM, &case_reference, pairs).await
}

/// The selectable feedback types, shaped as the renderer's choice group.
///
/// Fetched for the GET render and again for the POST-failure re-render, so
/// a rejected submission still shows every option.
async fn feedback_choice_extras(
    dependencies: &AppDependencies,
) -> Result<Map<String, Value>, PortalError> {
    let envelope = dependencies.case_api().get_feedback_choices().await?;
    let options = if envelope.is_success() {
        envelope.data.unwrap_or_else(|| Value::Array(Vec::new()))
    } else {
        Value::Array(Vec::new())
    };

    let mut extras = Map::new();
    extras.insert(
        "choices".to_string(),
        json!({ "name": "feedbackType", "options": options }),
    );
    Ok(extras)
}

/// The feedback form additionally renders the selectable feedback types
/// fetched from the case API.
pub async fn get_operator_feedback(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
) -> Result<Html<String>, PortalError> {
    let extras = feedback_choice_extras(&dependencies).await?;
    show_edit_form_with(&dependencies, &OPERATOR_FEEDBACK_FORM, &case_reference, extras).await
}

pub async fn post_operator_feedback(
    State(dependencies): State<AppDependencies>,
    Path(case_reference): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PortalError> {
    let extras = feedback_choice_extras(&dependencies).await?;
    submit_edit_form_with(
        &dependencies,
        &OPERATOR_FEEDBACK_FORM,
        &case_reference,
        pairs,
        extras,
    )
    .await
}
