//! Parsed form submissions.
//!
//! A POST body arrives as urlencoded key/value pairs. [`FormSubmission`]
//! keeps every pair in order, so a key appearing once reads as text and a
//! key repeated (checkbox groups, hidden `existing*` lists) reads as an
//! item list. The tagged [`FieldValue`] shape is decided here, once, at the
//! boundary.

use serde_json::{Map, Value};

use crate::domain::{FieldDescriptor, FieldKind, FieldValue};

/// An immutable view over one submitted form body.
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    pairs: Vec<(String, String)>,
}

impl FormSubmission {
    /// Wraps the urlencoded pairs of a request body.
    #[must_use]
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted under `key`, if any.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// All values submitted under `key`, in submission order.
    #[must_use]
    pub fn items(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Whether any pair was submitted under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(name, _)| name == key)
    }

    /// The submitted value of a descriptor's field, shaped by its kind.
    ///
    /// A missing text input reads as `""` and a missing checkbox group as
    /// `[]`, matching how browsers omit unticked checkboxes entirely.
    #[must_use]
    pub fn value_of(&self, descriptor: &FieldDescriptor) -> FieldValue {
        self.value_at(descriptor.binding.submitted_key, descriptor.kind)
    }

    /// The round-tripped `existing*` value of a descriptor's field, when the
    /// hidden input was present in the submission.
    #[must_use]
    pub fn existing_of(&self, descriptor: &FieldDescriptor) -> Option<FieldValue> {
        if self.contains(descriptor.binding.existing_key) {
            Some(self.value_at(descriptor.binding.existing_key, descriptor.kind))
        } else {
            None
        }
    }

    fn value_at(&self, key: &str, kind: FieldKind) -> FieldValue {
        match kind {
            FieldKind::Text => FieldValue::Text(self.text(key).unwrap_or_default().to_string()),
            FieldKind::Items { .. } => FieldValue::Items(self.items(key)),
        }
    }
}

/// Reads a field value out of a session snapshot object.
///
/// Snapshots store text fields as JSON strings and item fields as JSON
/// string arrays; anything else reads as absent ("no prior state").
#[must_use]
pub fn snapshot_value(snapshot: &Map<String, Value>, key: &str, kind: FieldKind) -> Option<FieldValue> {
    let stored = snapshot.get(key)?;
    match kind {
        FieldKind::Text => stored.as_str().map(|s| FieldValue::Text(s.to_string())),
        FieldKind::Items { .. } => stored.as_array().map(|values| {
            FieldValue::Items(
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(ToString::to_string))
                    .collect(),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldBinding;
    use rstest::rstest;
    use serde_json::json;

    fn pairs(entries: &[(&str, &str)]) -> FormSubmission {
        FormSubmission::new(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    const NAME: FieldDescriptor = FieldDescriptor::text(
        FieldBinding::new("fullName", "existingFullName", "currentFullName"),
        "fullName",
    );

    #[rstest]
    fn text_reads_first_value() {
        let submission = pairs(&[("fullName", "Jane Doe"), ("fullName", "shadowed")]);
        assert_eq!(submission.text("fullName"), Some("Jane Doe"));
    }

    #[rstest]
    fn missing_text_field_reads_as_empty() {
        let submission = pairs(&[]);
        assert_eq!(
            submission.value_of(&NAME),
            FieldValue::Text(String::new())
        );
    }

    #[rstest]
    fn repeated_keys_read_as_items() {
        let submission = pairs(&[
            ("supportNeeds", "bslWebcam"),
            ("supportNeeds", "textRelay"),
        ]);
        assert_eq!(
            submission.items("supportNeeds"),
            vec!["bslWebcam".to_string(), "textRelay".to_string()]
        );
    }

    #[rstest]
    fn existing_value_requires_hidden_input() {
        let with_hidden = pairs(&[("fullName", "John"), ("existingFullName", "Jane Doe")]);
        let without_hidden = pairs(&[("fullName", "John")]);

        assert_eq!(
            with_hidden.existing_of(&NAME),
            Some(FieldValue::Text("Jane Doe".to_string()))
        );
        assert_eq!(without_hidden.existing_of(&NAME), None);
    }

    #[rstest]
    fn snapshot_value_reads_text_and_items() {
        let snapshot = json!({
            "fullName": "Jane Doe",
            "supportNeeds": ["bslWebcam"],
        });
        let snapshot = snapshot.as_object().unwrap();

        assert_eq!(
            snapshot_value(snapshot, "fullName", FieldKind::Text),
            Some(FieldValue::Text("Jane Doe".to_string()))
        );
        assert_eq!(
            snapshot_value(
                snapshot,
                "supportNeeds",
                FieldKind::Items {
                    options: &[],
                    reveals: &[]
                }
            ),
            Some(FieldValue::Items(vec!["bslWebcam".to_string()]))
        );
    }

    #[rstest]
    fn snapshot_value_with_wrong_shape_is_absent() {
        let snapshot = json!({ "fullName": 42 });
        let snapshot = snapshot.as_object().unwrap();

        assert_eq!(snapshot_value(snapshot, "fullName", FieldKind::Text), None);
        assert_eq!(snapshot_value(snapshot, "missing", FieldKind::Text), None);
    }
}
