//! Template context assembly.
//!
//! Builds the JSON context handed to the renderer for both paths of an
//! edit form: the GET path (current values extracted from the record) and
//! the POST failure path (submitted values echoed back, with inline errors
//! and the filtered error summary).
//!
//! The summary honours the GOV.UK convention: entries anchor to their
//! field via `#<name>` fragments and, when several rules fire at once,
//! only the most important messages survive (see `application::priority`).

use serde_json::{Map, Value, json};

use crate::application::{
    FormConfig, FormSubmission, filter_errors_by_priority, rank_errors,
};
use crate::domain::{CaseReference, FieldDescriptor, FieldKind, ValidationErrorRecord};

/// The inline error map: first error wins per field.
#[must_use]
pub fn input_errors(errors: &[ValidationErrorRecord]) -> Map<String, Value> {
    let mut inline = Map::new();
    for error in errors {
        if let Some(name) = error.field_name() {
            inline
                .entry(name.to_string())
                .or_insert_with(|| Value::String(error.inline_message.clone()));
        }
    }
    inline
}

/// The filtered, anchored summary list.
///
/// Errors are ranked by the form's priority map, reduced to the most
/// important ones, and emitted as `{ text, href }` entries. Global errors
/// anchor to the top of the form.
#[must_use]
pub fn error_summary_list(
    errors: Vec<ValidationErrorRecord>,
    priority_map: &[(&str, u32)],
) -> Vec<Value> {
    let ranked = rank_errors(errors, priority_map);
    filter_errors_by_priority(ranked)
        .into_iter()
        .map(|error| {
            let href = error
                .field_name()
                .map_or_else(|| "#".to_string(), |name| format!("#{name}"));
            json!({ "text": error.summary_message, "href": href })
        })
        .collect()
}

/// Context for the GET path: extracted current values, no errors.
///
/// `extras` are form-specific template values (reference data such as the
/// selectable feedback types) merged in at the top level of the context.
#[must_use]
pub fn current_values_context(
    case_reference: &CaseReference,
    csrf_token: Option<&str>,
    fields: Map<String, Value>,
    extras: Map<String, Value>,
) -> Value {
    base_context(case_reference, csrf_token, fields, extras, None)
}

/// Context for the POST failure path: the submission echoed back so the
/// user keeps what they typed, plus inline errors and the summary.
///
/// `extras` carry the same reference data the GET path rendered, so the
/// re-rendered form is complete.
#[must_use]
pub fn failed_submission_context(
    case_reference: &CaseReference,
    csrf_token: Option<&str>,
    form: &FormConfig,
    submission: &FormSubmission,
    errors: Vec<ValidationErrorRecord>,
    extras: Map<String, Value>,
) -> Value {
    let mut fields = Map::new();
    for descriptor in form.schema.descriptors {
        let binding = &descriptor.binding;
        fields.insert(
            binding.display_key.to_string(),
            submitted_json(submission, binding.submitted_key, descriptor),
        );
        if descriptor.include_existing && submission.contains(binding.existing_key) {
            fields.insert(
                binding.existing_key.to_string(),
                submitted_json(submission, binding.existing_key, descriptor),
            );
        }
    }

    base_context(case_reference, csrf_token, fields, extras, Some((form, errors)))
}

fn submitted_json(submission: &FormSubmission, key: &str, descriptor: &FieldDescriptor) -> Value {
    match descriptor.kind {
        FieldKind::Text => Value::String(submission.text(key).unwrap_or_default().to_string()),
        FieldKind::Items { .. } => Value::Array(
            submission
                .items(key)
                .into_iter()
                .map(Value::String)
                .collect(),
        ),
    }
}

fn base_context(
    case_reference: &CaseReference,
    csrf_token: Option<&str>,
    fields: Map<String, Value>,
    extras: Map<String, Value>,
    failure: Option<(&FormConfig, Vec<ValidationErrorRecord>)>,
) -> Value {
    let mut context = Map::new();
    context.insert(
        "caseReference".to_string(),
        Value::String(case_reference.to_string()),
    );
    if let Some(token) = csrf_token {
        context.insert("csrfToken".to_string(), Value::String(token.to_string()));
    }
    context.insert("fields".to_string(), Value::Object(fields));
    context.extend(extras);

    if let Some((form, errors)) = failure {
        context.insert(
            "inputErrors".to_string(),
            Value::Object(input_errors(&errors)),
        );
        context.insert(
            "errorSummaryList".to_string(),
            Value::Array(error_summary_list(errors, form.priority_map)),
        );
    }

    Value::Object(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::catalog::{CLIENT_NAME_FORM, PHONE_FORM};
    use rstest::rstest;
    use serde_json::json;

    fn reference() -> CaseReference {
        CaseReference::parse("PC-1922-1879").unwrap()
    }

    fn submission(entries: &[(&str, &str)]) -> FormSubmission {
        FormSubmission::new(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[rstest]
    fn input_errors_takes_the_first_message_per_field() {
        let errors = vec![
            ValidationErrorRecord::field("fullName", "first", "first"),
            ValidationErrorRecord::field("fullName", "second", "second"),
        ];

        let inline = input_errors(&errors);

        assert_eq!(inline["fullName"], json!("first"));
    }

    #[rstest]
    fn summary_filters_to_highest_priority_and_anchors() {
        // "required" outranks "format" for the phone form.
        let errors = vec![
            ValidationErrorRecord::field(
                "phoneNumber",
                "Enter a telephone number in the correct format",
                "Enter a telephone number in the correct format",
            ),
            ValidationErrorRecord::field(
                "phoneNumber",
                "Enter the client's telephone number",
                "Enter the client's telephone number",
            ),
        ];

        let summary = error_summary_list(errors, PHONE_FORM.priority_map);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0]["text"], "Enter the client's telephone number");
        assert_eq!(summary[0]["href"], "#phoneNumber");
    }

    #[rstest]
    fn global_errors_anchor_to_the_form_top() {
        let errors = vec![ValidationErrorRecord::global("problem", "problem")];
        let summary = error_summary_list(errors, &[]);

        assert_eq!(summary[0]["href"], "#");
    }

    #[rstest]
    fn failed_context_echoes_submitted_and_existing_values() {
        let body = submission(&[
            ("fullName", "typed value"),
            ("existingFullName", "Jane Doe"),
        ]);
        let errors = vec![ValidationErrorRecord::field(
            "fullName",
            "Update the client's name",
            "Update the client's name",
        )];

        let context = failed_submission_context(
            &reference(),
            None,
            &CLIENT_NAME_FORM,
            &body,
            errors,
            Map::new(),
        );

        assert_eq!(context["fields"]["currentFullName"], "typed value");
        assert_eq!(context["fields"]["existingFullName"], "Jane Doe");
        assert_eq!(context["inputErrors"]["fullName"], "Update the client's name");
        assert_eq!(context["errorSummaryList"][0]["href"], "#fullName");
    }

    #[rstest]
    fn get_context_carries_reference_and_optional_token() {
        let mut fields = Map::new();
        fields.insert("currentFullName".to_string(), json!("Jane Doe"));

        let context = current_values_context(&reference(), Some("token-1"), fields, Map::new());

        assert_eq!(context["caseReference"], "PC-1922-1879");
        assert_eq!(context["csrfToken"], "token-1");
        assert!(context.get("errorSummaryList").is_none());
    }

    #[rstest]
    fn extras_reach_both_context_paths_at_the_top_level() {
        let mut extras = Map::new();
        extras.insert(
            "choices".to_string(),
            json!({
                "name": "feedbackType",
                "options": [{ "id": "compliment", "label": "Compliment" }],
            }),
        );

        let get_context =
            current_values_context(&reference(), None, Map::new(), extras.clone());
        let errors = vec![ValidationErrorRecord::field(
            "feedbackType",
            "Select the type of feedback",
            "Select the type of feedback",
        )];
        let failure_context = failed_submission_context(
            &reference(),
            None,
            &CLIENT_NAME_FORM,
            &submission(&[]),
            errors,
            extras,
        );

        assert_eq!(get_context["choices"]["options"][0]["label"], "Compliment");
        assert_eq!(
            failure_context["choices"]["options"][0]["label"],
            "Compliment"
        );
    }
}
