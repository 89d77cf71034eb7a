//! Validation error records.
//!
//! Validation failures are data, never panics or `Err` values: the validator
//! returns a list of [`ValidationErrorRecord`] and the controller decides
//! whether to re-render. The target of an error is a tagged union decided
//! once at the validation boundary, so downstream code never sniffs shapes.

use serde::Serialize;

/// Priority given to errors whose summary message is not in a form's
/// priority map. Large so that unranked errors never outrank ranked ones.
pub const UNRANKED_PRIORITY: u32 = 9_999;

/// What a validation error points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ErrorTarget {
    /// An error tied to one form field (anchored in the error summary).
    Field {
        /// Submitted key of the offending field.
        name: String,
    },
    /// An error about the submission as a whole.
    Global,
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorRecord {
    /// What the error points at.
    pub target: ErrorTarget,
    /// Message rendered next to the field.
    pub inline_message: String,
    /// Message rendered in the page-top error summary.
    pub summary_message: String,
    /// Rank used by the summary filter; lower is more important.
    pub priority: u32,
}

impl ValidationErrorRecord {
    /// Creates a field-targeted error with unranked priority.
    ///
    /// The priority is assigned later by the form's priority map; see
    /// `application::priority`.
    #[must_use]
    pub fn field(
        name: impl Into<String>,
        inline_message: impl Into<String>,
        summary_message: impl Into<String>,
    ) -> Self {
        Self {
            target: ErrorTarget::Field { name: name.into() },
            inline_message: inline_message.into(),
            summary_message: summary_message.into(),
            priority: UNRANKED_PRIORITY,
        }
    }

    /// Creates a global error with unranked priority.
    #[must_use]
    pub fn global(inline_message: impl Into<String>, summary_message: impl Into<String>) -> Self {
        Self {
            target: ErrorTarget::Global,
            inline_message: inline_message.into(),
            summary_message: summary_message.into(),
            priority: UNRANKED_PRIORITY,
        }
    }

    /// Returns the field name this error is anchored to, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match &self.target {
            ErrorTarget::Field { name } => Some(name),
            ErrorTarget::Global => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn field_error_carries_target_name() {
        let error = ValidationErrorRecord::field("fullName", "Enter the name", "Enter the name");

        assert_eq!(error.field_name(), Some("fullName"));
        assert_eq!(error.priority, UNRANKED_PRIORITY);
    }

    #[rstest]
    fn global_error_has_no_field_name() {
        let error = ValidationErrorRecord::global("Nothing changed", "Nothing changed");

        assert_eq!(error.field_name(), None);
        assert_eq!(error.target, ErrorTarget::Global);
    }

    #[rstest]
    fn target_serialises_tagged() {
        let error = ValidationErrorRecord::field("fullName", "a", "b");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["target"]["kind"], "field");
        assert_eq!(json["target"]["name"], "fullName");
    }
}
