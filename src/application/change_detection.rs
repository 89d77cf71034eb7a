//! No-op submission detection.
//!
//! An edit form submission must actually change something. The baseline a
//! field is compared against is the round-tripped `existing*` hidden input
//! when the browser sent one, falling back to the session snapshot written
//! on GET. A missing baseline means "no prior state": the field counts as
//! changed, so a POST that never saw a GET (expired session, direct POST)
//! validates normally instead of crashing.

use serde_json::{Map, Value};

use crate::domain::{FieldDescriptor, FieldValue};

use super::submission::{FormSubmission, snapshot_value};

/// How one submitted field compares to its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDiff {
    /// The submitted value differs from the baseline.
    Changed,
    /// The submitted value equals the baseline (trimmed text, sorted sets).
    Unchanged,
    /// No baseline exists; treated as changed.
    NoBaseline,
}

impl FieldDiff {
    /// Whether this diff counts as a change.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::Changed | Self::NoBaseline)
    }
}

/// Resolves the baseline value for one field.
///
/// The hidden `existing*` input wins over the session snapshot; the
/// snapshot covers fields the browser did not round-trip.
#[must_use]
pub fn baseline_of(
    submission: &FormSubmission,
    snapshot: Option<&Map<String, Value>>,
    descriptor: &FieldDescriptor,
) -> Option<FieldValue> {
    submission.existing_of(descriptor).or_else(|| {
        snapshot
            .and_then(|snap| snapshot_value(snap, descriptor.binding.submitted_key, descriptor.kind))
    })
}

/// Diffs one submitted field against its baseline.
#[must_use]
pub fn diff_field(
    submission: &FormSubmission,
    snapshot: Option<&Map<String, Value>>,
    descriptor: &FieldDescriptor,
) -> FieldDiff {
    let submitted = submission.value_of(descriptor);

    baseline_of(submission, snapshot, descriptor).map_or(FieldDiff::NoBaseline, |baseline| {
        if submitted.eq_normalised(&baseline) {
            FieldDiff::Unchanged
        } else {
            FieldDiff::Changed
        }
    })
}

/// Whether any of the form's fields changed relative to its baseline.
///
/// Empty-vs-empty after trim counts as unchanged, not as a change.
#[must_use]
pub fn any_field_changed(
    submission: &FormSubmission,
    snapshot: Option<&Map<String, Value>>,
    descriptors: &[FieldDescriptor],
) -> bool {
    descriptors
        .iter()
        .any(|descriptor| diff_field(submission, snapshot, descriptor).is_change())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldBinding;
    use rstest::rstest;
    use serde_json::json;

    const NAME: FieldDescriptor = FieldDescriptor::text(
        FieldBinding::new("fullName", "existingFullName", "currentFullName"),
        "fullName",
    );

    fn submission(entries: &[(&str, &str)]) -> FormSubmission {
        FormSubmission::new(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[rstest]
    fn hidden_input_baseline_detects_no_op() {
        let body = submission(&[("fullName", " Jane Doe "), ("existingFullName", "Jane Doe")]);
        assert_eq!(diff_field(&body, None, &NAME), FieldDiff::Unchanged);
    }

    #[rstest]
    fn hidden_input_baseline_detects_change() {
        let body = submission(&[("fullName", "John Smith"), ("existingFullName", "Jane Doe")]);
        assert_eq!(diff_field(&body, None, &NAME), FieldDiff::Changed);
    }

    #[rstest]
    fn snapshot_fallback_applies_when_hidden_input_absent() {
        let snapshot = json!({ "fullName": "Jane Doe" });
        let snapshot = snapshot.as_object().unwrap();

        let body = submission(&[("fullName", "Jane Doe")]);
        assert_eq!(
            diff_field(&body, Some(snapshot), &NAME),
            FieldDiff::Unchanged
        );
    }

    #[rstest]
    fn missing_baseline_counts_as_changed() {
        let body = submission(&[("fullName", "Jane Doe")]);
        let diff = diff_field(&body, None, &NAME);

        assert_eq!(diff, FieldDiff::NoBaseline);
        assert!(diff.is_change());
    }

    #[rstest]
    fn empty_versus_empty_is_unchanged() {
        let body = submission(&[("fullName", "   "), ("existingFullName", "")]);
        assert_eq!(diff_field(&body, None, &NAME), FieldDiff::Unchanged);
    }

    #[rstest]
    fn any_field_changed_spots_one_edit_among_many() {
        const PHONE: FieldDescriptor = FieldDescriptor::text(
            FieldBinding::new("phoneNumber", "existingPhoneNumber", "currentPhoneNumber"),
            "phoneNumber",
        );

        let body = submission(&[
            ("fullName", "Jane Doe"),
            ("existingFullName", "Jane Doe"),
            ("phoneNumber", "0113 496 0000"),
            ("existingPhoneNumber", "0113 496 9999"),
        ]);

        assert!(any_field_changed(&body, None, &[NAME, PHONE]));
    }

    #[rstest]
    fn all_unchanged_reports_no_change() {
        let body = submission(&[("fullName", "Jane Doe"), ("existingFullName", "Jane Doe")]);
        assert!(!any_field_changed(&body, None, &[NAME]));
    }
}
