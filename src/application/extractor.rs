//! Field extraction from fetched case records.
//!
//! Given the raw record returned by the case API and a form's field
//! descriptors, produces the current-value map used to pre-populate the
//! form, the `existing*` twins round-tripped as hidden inputs, and the flat
//! snapshot written into the session on the GET path.
//!
//! # Coercion rules
//!
//! - Text fields coerce missing or non-string values to `""`.
//! - Item fields coerce to `[]`, deriving membership from boolean-like
//!   record flags: `"yes"`/`"true"` (case-insensitive) and `true` are true,
//!   `"no"`/`"false"` and `false` are false, any other non-empty string is
//!   true.
//! - Synthetic reveal keys (for example `languageSelection`) are appended
//!   when their dependent text field is non-empty, which opens the matching
//!   checkbox reveal panel on first render.

use serde_json::{Map, Value};

use crate::domain::{FieldDescriptor, FieldKind, FieldValue};

/// The output of extracting one form's fields from a case record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Template values keyed by display key, plus `existing*` twins for
    /// descriptors that round-trip a baseline.
    pub render: Map<String, Value>,
    /// Flat baseline keyed by submitted key, written to the session
    /// snapshot on GET so a later POST can still see the original shape.
    pub snapshot: Map<String, Value>,
}

/// Resolves a dotted path (`clientSupportNeeds.bslWebcam`) inside a record.
#[must_use]
pub fn lookup_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| current.get(segment))
}

/// Whether a record value counts as "ticked" for checkbox membership.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => {
            let lowered = text.trim().to_ascii_lowercase();
            match lowered.as_str() {
                "yes" | "true" => true,
                "no" | "false" | "" => false,
                _ => true,
            }
        }
        _ => false,
    }
}

/// Coerces an optional record value to text; missing or non-string is `""`.
#[must_use]
pub fn coerce_text(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Extracts the current value of one descriptor from the record.
#[must_use]
pub fn extract_field(record: &Value, descriptor: &FieldDescriptor) -> FieldValue {
    match descriptor.kind {
        FieldKind::Text => FieldValue::Text(coerce_text(lookup_path(record, descriptor.source_path))),
        FieldKind::Items { options, reveals } => {
            let mut selected = Vec::new();

            for option in options {
                let path = joined_path(descriptor.source_path, option.path);
                if lookup_path(record, &path).is_some_and(is_truthy) {
                    selected.push(option.key.to_string());
                }
            }

            for reveal in reveals {
                let path = joined_path(descriptor.source_path, reveal.depends_on);
                if !coerce_text(lookup_path(record, &path)).trim().is_empty() {
                    selected.push(reveal.key.to_string());
                }
            }

            FieldValue::Items(selected)
        }
    }
}

/// Extracts every descriptor's current value from the record.
///
/// Descriptors with `include_existing` also emit an `existing*` twin equal
/// to the current value; this is the baseline the change-detection
/// validator compares future submissions against.
#[must_use]
pub fn extract_current_fields(
    record: &Value,
    descriptors: &[FieldDescriptor],
) -> ExtractedFields {
    let mut extracted = ExtractedFields::default();

    for descriptor in descriptors {
        let value = extract_field(record, descriptor);
        let json = field_value_to_json(&value);

        extracted
            .render
            .insert(descriptor.binding.display_key.to_string(), json.clone());

        if descriptor.include_existing {
            extracted
                .render
                .insert(descriptor.binding.existing_key.to_string(), json.clone());
        }

        extracted
            .snapshot
            .insert(descriptor.binding.submitted_key.to_string(), json);
    }

    extracted
}

/// Converts a field value into its snapshot/template JSON shape.
#[must_use]
pub fn field_value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::String(text.clone()),
        FieldValue::Items(items) => Value::Array(
            items
                .iter()
                .map(|item| Value::String(item.clone()))
                .collect(),
        ),
    }
}

fn joined_path(base: &str, relative: &str) -> String {
    if base.is_empty() {
        relative.to_string()
    } else {
        format!("{base}.{relative}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckboxOption, FieldBinding, RevealOption};
    use rstest::rstest;
    use serde_json::json;

    const NAME: FieldDescriptor = FieldDescriptor::text(
        FieldBinding::new("fullName", "existingFullName", "currentFullName"),
        "fullName",
    );

    const SUPPORT_OPTIONS: &[CheckboxOption] = &[
        CheckboxOption {
            key: "bslWebcam",
            path: "bslWebcam",
        },
        CheckboxOption {
            key: "textRelay",
            path: "textRelay",
        },
    ];

    const SUPPORT_REVEALS: &[RevealOption] = &[RevealOption {
        key: "languageSelection",
        depends_on: "languageSelection",
    }];

    const SUPPORT_NEEDS: FieldDescriptor = FieldDescriptor {
        binding: FieldBinding::new(
            "supportNeeds",
            "existingSupportNeeds",
            "currentSupportNeeds",
        ),
        kind: FieldKind::Items {
            options: SUPPORT_OPTIONS,
            reveals: SUPPORT_REVEALS,
        },
        source_path: "clientSupportNeeds",
        include_existing: true,
        required: None,
        format: None,
        precedence: crate::domain::RulePrecedence::RequiredFormatUnchanged,
    };

    #[rstest]
    fn lookup_path_resolves_nested_values() {
        let record = json!({ "clientSupportNeeds": { "bslWebcam": "yes" } });
        assert_eq!(
            lookup_path(&record, "clientSupportNeeds.bslWebcam"),
            Some(&json!("yes"))
        );
        assert_eq!(lookup_path(&record, "clientSupportNeeds.missing"), None);
    }

    #[rstest]
    #[case(json!("yes"), true)]
    #[case(json!("Yes"), true)]
    #[case(json!("true"), true)]
    #[case(json!("no"), false)]
    #[case(json!("false"), false)]
    #[case(json!(""), false)]
    #[case(json!("sometimes"), true)]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(3), false)]
    fn truthiness_rules(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_truthy(&value), expected);
    }

    #[rstest]
    fn text_extraction_coerces_missing_to_empty() {
        let record = json!({});
        assert_eq!(extract_field(&record, &NAME), FieldValue::Text(String::new()));

        let record = json!({ "fullName": 42 });
        assert_eq!(extract_field(&record, &NAME), FieldValue::Text(String::new()));
    }

    #[rstest]
    fn items_extraction_derives_membership_and_reveals() {
        let record = json!({
            "clientSupportNeeds": {
                "bslWebcam": "yes",
                "textRelay": "no",
                "languageSelection": "Welsh",
            }
        });

        let value = extract_field(&record, &SUPPORT_NEEDS);

        assert_eq!(
            value,
            FieldValue::Items(vec![
                "bslWebcam".to_string(),
                "languageSelection".to_string()
            ])
        );
    }

    #[rstest]
    fn items_extraction_coerces_missing_parent_to_empty() {
        let record = json!({});
        assert_eq!(
            extract_field(&record, &SUPPORT_NEEDS),
            FieldValue::Items(vec![])
        );
    }

    #[rstest]
    fn extract_emits_display_existing_and_snapshot_keys() {
        let record = json!({ "fullName": "Jane Doe" });

        let extracted = extract_current_fields(&record, &[NAME]);

        assert_eq!(extracted.render["currentFullName"], json!("Jane Doe"));
        assert_eq!(extracted.render["existingFullName"], json!("Jane Doe"));
        assert_eq!(extracted.snapshot["fullName"], json!("Jane Doe"));
    }

    #[rstest]
    fn extract_omits_existing_twin_when_not_requested() {
        const NO_BASELINE: FieldDescriptor = FieldDescriptor::text(
            FieldBinding::new("fullName", "existingFullName", "currentFullName"),
            "fullName",
        )
        .without_existing();

        let record = json!({ "fullName": "Jane Doe" });
        let extracted = extract_current_fields(&record, &[NO_BASELINE]);

        assert!(extracted.render.contains_key("currentFullName"));
        assert!(!extracted.render.contains_key("existingFullName"));
    }
}
