//! The validation seam: one interface, two implementations.
//!
//! Every form's POST path converges on the [`Validator`] trait. Most forms
//! are schema-driven ([`SchemaValidator`] walks the form's field
//! descriptors); composite forms such as date of birth supply a bespoke
//! function through [`CustomValidator`]. Both produce the same
//! [`ValidationErrorRecord`] shape, so the controller has a single call
//! site and never branches on how a form chose to validate.

use serde_json::{Map, Value};

use crate::domain::{RuleMessage, RulePrecedence, ValidationErrorRecord};

use super::change_detection::any_field_changed;
use super::rules::matches_format;
use super::submission::FormSubmission;

/// The form-level no-op rule: which field the error is anchored to and the
/// message shown when nothing changed.
#[derive(Debug, Clone, Copy)]
pub struct UnchangedRule {
    /// Submitted key of the field the summary link jumps to.
    pub anchor_field: &'static str,
    /// Error message for a no-op submission.
    pub message: RuleMessage,
}

/// The schema-driven pieces of one form's validation.
#[derive(Debug, Clone, Copy)]
pub struct FormSchema {
    /// The form's field descriptors.
    pub descriptors: &'static [crate::domain::FieldDescriptor],
    /// No-op detection; `None` for forms without a baseline (add forms,
    /// operator feedback).
    pub unchanged: Option<UnchangedRule>,
}

/// A bespoke validation function for forms the schema cannot express.
pub type CustomValidateFn =
    fn(&FormSubmission, Option<&Map<String, Value>>) -> Vec<ValidationErrorRecord>;

/// The single validation interface the controller calls.
pub trait Validator: Send + Sync {
    /// Validates one submission against its baseline snapshot.
    ///
    /// Returned errors are unranked; the controller assigns priorities from
    /// the form's priority map before building the summary.
    fn validate(
        &self,
        submission: &FormSubmission,
        snapshot: Option<&Map<String, Value>>,
    ) -> Vec<ValidationErrorRecord>;
}

/// Schema-driven validator walking a form's field descriptors.
///
/// Rule order per field is the descriptor's [`RulePrecedence`]:
///
/// - required fires first; a required-empty field never also reports
///   unchanged in the same pass,
/// - the form-level unchanged check fires only when no field changed and no
///   required error was raised,
/// - format checks run on non-empty values; fields configured
///   `RequiredUnchangedFormat` skip their format check when the unchanged
///   error fired (the no-op short-circuits them).
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator {
    schema: FormSchema,
}

impl SchemaValidator {
    /// Wraps a form schema.
    #[must_use]
    pub const fn new(schema: FormSchema) -> Self {
        Self { schema }
    }
}

impl Validator for SchemaValidator {
    fn validate(
        &self,
        submission: &FormSubmission,
        snapshot: Option<&Map<String, Value>>,
    ) -> Vec<ValidationErrorRecord> {
        let mut errors = Vec::new();

        // Required checks.
        let mut required_fired = false;
        for descriptor in self.schema.descriptors {
            if let Some(message) = descriptor.required {
                if submission.value_of(descriptor).is_empty() {
                    required_fired = true;
                    errors.push(ValidationErrorRecord::field(
                        descriptor.binding.submitted_key,
                        message.inline,
                        message.summary,
                    ));
                }
            }
        }

        // Form-level no-op check, skipped when a required error already
        // explains the submission.
        let mut unchanged_fired = false;
        if let Some(rule) = self.schema.unchanged {
            if !required_fired
                && !any_field_changed(submission, snapshot, self.schema.descriptors)
            {
                unchanged_fired = true;
                errors.push(ValidationErrorRecord::field(
                    rule.anchor_field,
                    rule.message.inline,
                    rule.message.summary,
                ));
            }
        }

        // Format checks on non-empty values.
        for descriptor in self.schema.descriptors {
            let Some((rule, message)) = descriptor.format else {
                continue;
            };

            let value = submission.value_of(descriptor);
            if value.is_empty() {
                continue;
            }

            if unchanged_fired && descriptor.precedence == RulePrecedence::RequiredUnchangedFormat
            {
                continue;
            }

            if !matches_format(rule, value.as_trimmed_text()) {
                errors.push(ValidationErrorRecord::field(
                    descriptor.binding.submitted_key,
                    message.inline,
                    message.summary,
                ));
            }
        }

        errors
    }
}

/// Adapter running a bespoke validation function behind the common trait.
#[derive(Debug, Clone, Copy)]
pub struct CustomValidator {
    function: CustomValidateFn,
}

impl CustomValidator {
    /// Wraps a bespoke validation function.
    #[must_use]
    pub const fn new(function: CustomValidateFn) -> Self {
        Self { function }
    }
}

impl Validator for CustomValidator {
    fn validate(
        &self,
        submission: &FormSubmission,
        snapshot: Option<&Map<String, Value>>,
    ) -> Vec<ValidationErrorRecord> {
        (self.function)(submission, snapshot)
    }
}
