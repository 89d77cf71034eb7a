//! The edit-form catalog.
//!
//! One static [`FormConfig`] per edit form: which fields it has, how they
//! are extracted and validated, how summary errors are ranked, what payload
//! shape the case API update expects, and which update operation to call.
//! The generic controller in `api::handlers::edit_form` is driven entirely
//! by these configurations; adding a form means adding a config and two
//! thin route handlers.

use serde_json::{Map, Value, json};

use crate::domain::{
    CheckboxOption, FieldBinding, FieldDescriptor, FieldKind, FormatRule, RevealOption,
    RuleMessage, RulePrecedence, ValidationErrorRecord,
};

use super::dates::{is_in_future, is_real_date, iso_date_parts, parse_date_parts, to_iso_date};
use super::extractor::{ExtractedFields, coerce_text, extract_current_fields, lookup_path};
use super::submission::FormSubmission;
use super::validator::{
    CustomValidator, FormSchema, SchemaValidator, UnchangedRule, Validator,
};

/// Which case API write a form's successful submission triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperation {
    /// Partial update of the client details record.
    UpdateClientDetails,
    /// Update of the provider's notes on the case.
    UpdateProviderNotes,
    /// Creation of a third-party contact.
    AddThirdPartyContact,
    /// Replacement of the client support needs block.
    UpdateClientSupportNeeds,
    /// Removal of the third-party contact (a 404 counts as success).
    DeleteThirdPartyContact,
    /// Submission of operator feedback.
    SubmitOperatorFeedback,
}

/// How a form's current values are extracted on GET.
#[derive(Clone, Copy)]
pub enum ExtractorChoice {
    /// Walk the form's field descriptors.
    Schema,
    /// A bespoke extractor for composite forms.
    Custom(fn(&Value) -> ExtractedFields),
}

/// How a form's submission is validated on POST.
#[derive(Clone, Copy)]
pub enum ValidationChoice {
    /// Schema-driven validation over the field descriptors.
    Schema,
    /// A bespoke validation function.
    Custom(super::validator::CustomValidateFn),
}

/// Static configuration of one edit form.
pub struct FormConfig {
    /// Form name; also the base of the session snapshot key
    /// (`<name>Original`).
    pub name: &'static str,
    /// Route segment under `/cases/{caseReference}/`.
    pub path: &'static str,
    /// Template identifier handed to the renderer.
    pub template: &'static str,
    /// Field descriptors and the form-level unchanged rule.
    pub schema: FormSchema,
    /// GET-path extraction strategy.
    pub extractor: ExtractorChoice,
    /// POST-path validation strategy.
    pub validation: ValidationChoice,
    /// Summary-message priority map; lower ranks are more important.
    pub priority_map: &'static [(&'static str, u32)],
    /// Builds the form-specific API payload from a valid submission.
    pub payload: fn(&FormSubmission) -> Value,
    /// Which API write to call on success.
    pub operation: UpdateOperation,
}

impl FormConfig {
    /// The session key suffix this form's snapshot is stored under.
    #[must_use]
    pub fn snapshot_name(&self) -> String {
        format!("{}Original", self.name)
    }

    /// The validator for this form, behind the common interface.
    #[must_use]
    pub fn validator(&'static self) -> Box<dyn Validator> {
        match self.validation {
            ValidationChoice::Schema => Box::new(SchemaValidator::new(self.schema)),
            ValidationChoice::Custom(function) => Box::new(CustomValidator::new(function)),
        }
    }

    /// Extracts the form's current values from a fetched case record.
    #[must_use]
    pub fn extract(&self, record: &Value) -> ExtractedFields {
        match self.extractor {
            ExtractorChoice::Schema => extract_current_fields(record, self.schema.descriptors),
            ExtractorChoice::Custom(function) => function(record),
        }
    }
}

// =============================================================================
// Client name
// =============================================================================

const CLIENT_NAME_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::text(
    FieldBinding::new("fullName", "existingFullName", "currentFullName"),
    "fullName",
)
.required(RuleMessage::same("Enter the client's name"))];

fn client_name_payload(submission: &FormSubmission) -> Value {
    json!({ "fullName": submission.text("fullName").unwrap_or_default().trim() })
}

/// The client name edit form.
pub static CLIENT_NAME_FORM: FormConfig = FormConfig {
    name: "clientName",
    path: "client-name",
    template: "case_details/edit_client_name",
    schema: FormSchema {
        descriptors: CLIENT_NAME_FIELDS,
        unchanged: Some(UnchangedRule {
            anchor_field: "fullName",
            message: RuleMessage::same("Update the client's name"),
        }),
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: &[("Enter the client's name", 1), ("Update the client's name", 2)],
    payload: client_name_payload,
    operation: UpdateOperation::UpdateClientDetails,
};

// =============================================================================
// Date of birth (composite form: custom extractor and validator)
// =============================================================================

const DATE_OF_BIRTH_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text(
        FieldBinding::new("dobDay", "existingDobDay", "currentDobDay"),
        "dateOfBirth",
    )
    .without_existing(),
    FieldDescriptor::text(
        FieldBinding::new("dobMonth", "existingDobMonth", "currentDobMonth"),
        "dateOfBirth",
    )
    .without_existing(),
    FieldDescriptor::text(
        FieldBinding::new("dobYear", "existingDobYear", "currentDobYear"),
        "dateOfBirth",
    )
    .without_existing(),
    FieldDescriptor::text(
        FieldBinding::new("dateOfBirth", "existingDateOfBirth", "currentDateOfBirth"),
        "dateOfBirth",
    ),
];

fn extract_date_of_birth(record: &Value) -> ExtractedFields {
    let iso = coerce_text(lookup_path(record, "dateOfBirth"));
    let (day, month, year) = iso_date_parts(&iso);

    let mut extracted = ExtractedFields::default();
    extracted.render.insert("currentDobDay".into(), json!(day));
    extracted.render.insert("currentDobMonth".into(), json!(month));
    extracted.render.insert("currentDobYear".into(), json!(year));
    extracted
        .render
        .insert("existingDateOfBirth".into(), json!(iso.clone()));
    extracted.snapshot.insert("dateOfBirth".into(), json!(iso));
    extracted
}

fn validate_date_of_birth(
    submission: &FormSubmission,
    snapshot: Option<&Map<String, Value>>,
) -> Vec<ValidationErrorRecord> {
    let day = submission.text("dobDay").unwrap_or_default().trim().to_string();
    let month = submission.text("dobMonth").unwrap_or_default().trim().to_string();
    let year = submission.text("dobYear").unwrap_or_default().trim().to_string();

    if day.is_empty() || month.is_empty() || year.is_empty() {
        return vec![ValidationErrorRecord::field(
            "dobDay",
            "Enter the client's date of birth",
            "Enter the client's date of birth",
        )];
    }

    let Some(date) = parse_date_parts(&day, &month, &year) else {
        return vec![ValidationErrorRecord::field(
            "dobDay",
            "Date of birth must be a real date",
            "Date of birth must be a real date",
        )];
    };

    if is_in_future(date) {
        return vec![ValidationErrorRecord::field(
            "dobDay",
            "Date of birth must be in the past",
            "Date of birth must be in the past",
        )];
    }

    let submitted_iso = to_iso_date(date);
    let baseline = submission
        .text("existingDateOfBirth")
        .map(|value| value.trim().to_string())
        .or_else(|| {
            snapshot
                .and_then(|snap| snap.get("dateOfBirth"))
                .and_then(Value::as_str)
                .map(ToString::to_string)
        });

    if baseline.as_deref() == Some(submitted_iso.as_str()) {
        return vec![ValidationErrorRecord::field(
            "dobDay",
            "Update the client's date of birth",
            "Update the client's date of birth",
        )];
    }

    Vec::new()
}

fn date_of_birth_payload(submission: &FormSubmission) -> Value {
    let day = submission.text("dobDay").unwrap_or_default();
    let month = submission.text("dobMonth").unwrap_or_default();
    let year = submission.text("dobYear").unwrap_or_default();

    parse_date_parts(day, month, year)
        .map_or_else(|| json!({}), |date| json!({ "dateOfBirth": to_iso_date(date) }))
}

/// The date-of-birth edit form.
pub static DATE_OF_BIRTH_FORM: FormConfig = FormConfig {
    name: "dateOfBirth",
    path: "date-of-birth",
    template: "case_details/edit_date_of_birth",
    schema: FormSchema {
        descriptors: DATE_OF_BIRTH_FIELDS,
        unchanged: None, // the custom validator owns the unchanged check
    },
    extractor: ExtractorChoice::Custom(extract_date_of_birth),
    validation: ValidationChoice::Custom(validate_date_of_birth),
    priority_map: &[
        ("Enter the client's date of birth", 1),
        ("Date of birth must be a real date", 2),
        ("Date of birth must be in the past", 3),
        ("Update the client's date of birth", 4),
    ],
    payload: date_of_birth_payload,
    operation: UpdateOperation::UpdateClientDetails,
};

// =============================================================================
// Address
// =============================================================================

const ADDRESS_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::text(
    FieldBinding::new("address", "existingAddress", "currentAddress"),
    "address",
)
.required(RuleMessage::same("Enter the client's address"))];

fn address_payload(submission: &FormSubmission) -> Value {
    json!({ "address": submission.text("address").unwrap_or_default().trim() })
}

/// The client address edit form.
pub static ADDRESS_FORM: FormConfig = FormConfig {
    name: "address",
    path: "address",
    template: "case_details/edit_address",
    schema: FormSchema {
        descriptors: ADDRESS_FIELDS,
        unchanged: Some(UnchangedRule {
            anchor_field: "address",
            message: RuleMessage::same("Update the client's address"),
        }),
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: &[
        ("Enter the client's address", 1),
        ("Update the client's address", 2),
    ],
    payload: address_payload,
    operation: UpdateOperation::UpdateClientDetails,
};

// =============================================================================
// Phone number (unchanged check intentionally precedes the format check)
// =============================================================================

const PHONE_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::text(
    FieldBinding::new("phoneNumber", "existingPhoneNumber", "currentPhoneNumber"),
    "phoneNumber",
)
.required(RuleMessage::same("Enter the client's telephone number"))
.format(
    FormatRule::Phone,
    RuleMessage::same("Enter a telephone number in the correct format"),
)
.precedence(RulePrecedence::RequiredUnchangedFormat)];

fn phone_payload(submission: &FormSubmission) -> Value {
    json!({ "phoneNumber": submission.text("phoneNumber").unwrap_or_default().trim() })
}

/// The telephone number edit form.
pub static PHONE_FORM: FormConfig = FormConfig {
    name: "phoneNumber",
    path: "phone-number",
    template: "case_details/edit_phone_number",
    schema: FormSchema {
        descriptors: PHONE_FIELDS,
        unchanged: Some(UnchangedRule {
            anchor_field: "phoneNumber",
            message: RuleMessage::same("Update the client's telephone number"),
        }),
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: &[
        ("Enter the client's telephone number", 1),
        ("Update the client's telephone number", 2),
        ("Enter a telephone number in the correct format", 3),
    ],
    payload: phone_payload,
    operation: UpdateOperation::UpdateClientDetails,
};

// =============================================================================
// Email address
// =============================================================================

const EMAIL_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::text(
    FieldBinding::new("emailAddress", "existingEmailAddress", "currentEmailAddress"),
    "emailAddress",
)
.required(RuleMessage::same("Enter the client's email address"))
.format(
    FormatRule::Email,
    RuleMessage::same(
        "Enter an email address in the correct format, like name@example.com",
    ),
)];

fn email_payload(submission: &FormSubmission) -> Value {
    json!({ "emailAddress": submission.text("emailAddress").unwrap_or_default().trim() })
}

/// The email address edit form.
pub static EMAIL_FORM: FormConfig = FormConfig {
    name: "emailAddress",
    path: "email-address",
    template: "case_details/edit_email_address",
    schema: FormSchema {
        descriptors: EMAIL_FIELDS,
        unchanged: Some(UnchangedRule {
            anchor_field: "emailAddress",
            message: RuleMessage::same("Update the client's email address"),
        }),
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: &[
        ("Enter the client's email address", 1),
        ("Enter an email address in the correct format, like name@example.com", 2),
        ("Update the client's email address", 3),
    ],
    payload: email_payload,
    operation: UpdateOperation::UpdateClientDetails,
};

// =============================================================================
// Provider notes
// =============================================================================

const PROVIDER_NOTES_FIELDS: &[FieldDescriptor] = &[FieldDescriptor::text(
    FieldBinding::new("providerNotes", "existingProviderNotes", "currentProviderNotes"),
    "providerNotes",
)
.required(RuleMessage::same("Enter the provider notes"))];

fn provider_notes_payload(submission: &FormSubmission) -> Value {
    json!({ "providerNotes": submission.text("providerNotes").unwrap_or_default().trim() })
}

/// The provider notes edit form.
pub static PROVIDER_NOTES_FORM: FormConfig = FormConfig {
    name: "providerNotes",
    path: "provider-notes",
    template: "case_details/edit_provider_notes",
    schema: FormSchema {
        descriptors: PROVIDER_NOTES_FIELDS,
        unchanged: Some(UnchangedRule {
            anchor_field: "providerNotes",
            message: RuleMessage::same("Update the provider notes"),
        }),
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: &[("Enter the provider notes", 1), ("Update the provider notes", 2)],
    payload: provider_notes_payload,
    operation: UpdateOperation::UpdateProviderNotes,
};

// =============================================================================
// Third party contact (edit, add, remove)
// =============================================================================

const THIRD_PARTY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text(
        FieldBinding::new(
            "thirdPartyFullName",
            "existingThirdPartyFullName",
            "currentThirdPartyFullName",
        ),
        "thirdParty.fullName",
    )
    .required(RuleMessage::same("Enter the third party's name")),
    FieldDescriptor::text(
        FieldBinding::new(
            "thirdPartyRelationship",
            "existingThirdPartyRelationship",
            "currentThirdPartyRelationship",
        ),
        "thirdParty.relationshipToClient",
    )
    .required(RuleMessage::same("Enter the third party's relationship to the client")),
    FieldDescriptor::text(
        FieldBinding::new(
            "thirdPartyEmailAddress",
            "existingThirdPartyEmailAddress",
            "currentThirdPartyEmailAddress",
        ),
        "thirdParty.emailAddress",
    )
    .format(
        FormatRule::Email,
        RuleMessage::same("Enter a third party email address in the correct format"),
    ),
    FieldDescriptor::text(
        FieldBinding::new(
            "thirdPartyPhoneNumber",
            "existingThirdPartyPhoneNumber",
            "currentThirdPartyPhoneNumber",
        ),
        "thirdParty.phoneNumber",
    )
    .format(
        FormatRule::Phone,
        RuleMessage::same("Enter a third party telephone number in the correct format"),
    ),
];

// Third-party fields nest under `thirdParty` in the update payload.
fn third_party_payload(submission: &FormSubmission) -> Value {
    json!({
        "thirdParty": {
            "fullName": submission.text("thirdPartyFullName").unwrap_or_default().trim(),
            "relationshipToClient": submission
                .text("thirdPartyRelationship")
                .unwrap_or_default()
                .trim(),
            "emailAddress": submission
                .text("thirdPartyEmailAddress")
                .unwrap_or_default()
                .trim(),
            "phoneNumber": submission
                .text("thirdPartyPhoneNumber")
                .unwrap_or_default()
                .trim(),
        }
    })
}

const THIRD_PARTY_PRIORITIES: &[(&str, u32)] = &[
    ("Enter the third party's name", 1),
    ("Enter the third party's relationship to the client", 2),
    ("Enter a third party email address in the correct format", 3),
    ("Enter a third party telephone number in the correct format", 4),
    ("Update the third party's contact details", 5),
];

/// The third-party contact edit form.
pub static THIRD_PARTY_FORM: FormConfig = FormConfig {
    name: "thirdParty",
    path: "third-party",
    template: "case_details/edit_third_party",
    schema: FormSchema {
        descriptors: THIRD_PARTY_FIELDS,
        unchanged: Some(UnchangedRule {
            anchor_field: "thirdPartyFullName",
            message: RuleMessage::same("Update the third party's contact details"),
        }),
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: THIRD_PARTY_PRIORITIES,
    payload: third_party_payload,
    operation: UpdateOperation::UpdateClientDetails,
};

const THIRD_PARTY_ADD_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text(
        FieldBinding::new(
            "thirdPartyFullName",
            "existingThirdPartyFullName",
            "currentThirdPartyFullName",
        ),
        "thirdParty.fullName",
    )
    .required(RuleMessage::same("Enter the third party's name"))
    .without_existing(),
    FieldDescriptor::text(
        FieldBinding::new(
            "thirdPartyRelationship",
            "existingThirdPartyRelationship",
            "currentThirdPartyRelationship",
        ),
        "thirdParty.relationshipToClient",
    )
    .required(RuleMessage::same("Enter the third party's relationship to the client"))
    .without_existing(),
    FieldDescriptor::text(
        FieldBinding::new(
            "thirdPartyEmailAddress",
            "existingThirdPartyEmailAddress",
            "currentThirdPartyEmailAddress",
        ),
        "thirdParty.emailAddress",
    )
    .format(
        FormatRule::Email,
        RuleMessage::same("Enter a third party email address in the correct format"),
    )
    .without_existing(),
    FieldDescriptor::text(
        FieldBinding::new(
            "thirdPartyPhoneNumber",
            "existingThirdPartyPhoneNumber",
            "currentThirdPartyPhoneNumber",
        ),
        "thirdParty.phoneNumber",
    )
    .format(
        FormatRule::Phone,
        RuleMessage::same("Enter a third party telephone number in the correct format"),
    )
    .without_existing(),
];

/// The third-party contact add form; no baseline exists, so there is no
/// unchanged check.
pub static THIRD_PARTY_ADD_FORM: FormConfig = FormConfig {
    name: "thirdPartyAdd",
    path: "third-party/add",
    template: "case_details/add_third_party",
    schema: FormSchema {
        descriptors: THIRD_PARTY_ADD_FIELDS,
        unchanged: None,
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: THIRD_PARTY_PRIORITIES,
    payload: third_party_payload,
    operation: UpdateOperation::AddThirdPartyContact,
};

fn empty_payload(_submission: &FormSubmission) -> Value {
    Value::Null
}

/// The third-party removal confirmation form. Deletion is idempotent: a
/// "not found" from the case API is treated as success.
pub static THIRD_PARTY_REMOVE_FORM: FormConfig = FormConfig {
    name: "thirdPartyRemove",
    path: "third-party/remove",
    template: "case_details/remove_third_party",
    schema: FormSchema {
        descriptors: &[],
        unchanged: None,
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: &[],
    payload: empty_payload,
    operation: UpdateOperation::DeleteThirdPartyContact,
};

// =============================================================================
// Support needs
// =============================================================================

const SUPPORT_NEED_OPTIONS: &[CheckboxOption] = &[
    CheckboxOption {
        key: "bslWebcam",
        path: "bslWebcam",
    },
    CheckboxOption {
        key: "textRelay",
        path: "textRelay",
    },
    CheckboxOption {
        key: "callbackPreferred",
        path: "callbackPreferred",
    },
];

const SUPPORT_NEED_REVEALS: &[RevealOption] = &[
    RevealOption {
        key: "languageSelection",
        depends_on: "languageSelection",
    },
    RevealOption {
        key: "otherSupport",
        depends_on: "otherSupport",
    },
];

const SUPPORT_NEEDS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        binding: FieldBinding::new("supportNeeds", "existingSupportNeeds", "currentSupportNeeds"),
        kind: FieldKind::Items {
            options: SUPPORT_NEED_OPTIONS,
            reveals: SUPPORT_NEED_REVEALS,
        },
        source_path: "clientSupportNeeds",
        include_existing: true,
        required: None,
        format: None,
        precedence: RulePrecedence::RequiredFormatUnchanged,
    },
    FieldDescriptor::text(
        FieldBinding::new(
            "languageSelection",
            "existingLanguageSelection",
            "currentLanguageSelection",
        ),
        "clientSupportNeeds.languageSelection",
    ),
    FieldDescriptor::text(
        FieldBinding::new("otherSupport", "existingOtherSupport", "currentOtherSupport"),
        "clientSupportNeeds.otherSupport",
    ),
];

fn support_needs_payload(submission: &FormSubmission) -> Value {
    let selected = submission.items("supportNeeds");
    let ticked = |key: &str| {
        if selected.iter().any(|item| item == key) {
            "yes"
        } else {
            "no"
        }
    };

    json!({
        "clientSupportNeeds": {
            "bslWebcam": ticked("bslWebcam"),
            "textRelay": ticked("textRelay"),
            "callbackPreferred": ticked("callbackPreferred"),
            "languageSelection": submission.text("languageSelection").unwrap_or_default().trim(),
            "otherSupport": submission.text("otherSupport").unwrap_or_default().trim(),
        }
    })
}

/// The client support needs edit form.
pub static SUPPORT_NEEDS_FORM: FormConfig = FormConfig {
    name: "supportNeeds",
    path: "support-needs",
    template: "case_details/edit_support_needs",
    schema: FormSchema {
        descriptors: SUPPORT_NEEDS_FIELDS,
        unchanged: Some(UnchangedRule {
            anchor_field: "supportNeeds",
            message: RuleMessage::same("Update the client's support needs"),
        }),
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: &[("Update the client's support needs", 1)],
    payload: support_needs_payload,
    operation: UpdateOperation::UpdateClientSupportNeeds,
};

// =============================================================================
// Operator feedback
// =============================================================================

const OPERATOR_FEEDBACK_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text(
        FieldBinding::new("feedbackType", "existingFeedbackType", "currentFeedbackType"),
        "feedbackType",
    )
    .required(RuleMessage::same("Select the type of feedback"))
    .without_existing(),
    FieldDescriptor::text(
        FieldBinding::new("feedbackComment", "existingFeedbackComment", "currentFeedbackComment"),
        "feedbackComment",
    )
    .required(RuleMessage::same("Enter your feedback"))
    .without_existing(),
];

fn operator_feedback_payload(submission: &FormSubmission) -> Value {
    json!({
        "feedbackType": submission.text("feedbackType").unwrap_or_default().trim(),
        "comment": submission.text("feedbackComment").unwrap_or_default().trim(),
    })
}

/// The operator feedback form; each submission is new input, so there is no
/// unchanged check.
pub static OPERATOR_FEEDBACK_FORM: FormConfig = FormConfig {
    name: "operatorFeedback",
    path: "operator-feedback",
    template: "case_details/operator_feedback",
    schema: FormSchema {
        descriptors: OPERATOR_FEEDBACK_FIELDS,
        unchanged: None,
    },
    extractor: ExtractorChoice::Schema,
    validation: ValidationChoice::Schema,
    priority_map: &[("Select the type of feedback", 1), ("Enter your feedback", 2)],
    payload: operator_feedback_payload,
    operation: UpdateOperation::SubmitOperatorFeedback,
};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn submission(entries: &[(&str, &str)]) -> FormSubmission {
        FormSubmission::new(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[rstest]
    fn client_name_payload_trims_the_name() {
        let body = submission(&[("fullName", "  John Smith  ")]);
        assert_eq!(
            (CLIENT_NAME_FORM.payload)(&body),
            json!({ "fullName": "John Smith" })
        );
    }

    #[rstest]
    fn snapshot_name_appends_original_suffix() {
        assert_eq!(CLIENT_NAME_FORM.snapshot_name(), "clientNameOriginal");
        assert_eq!(SUPPORT_NEEDS_FORM.snapshot_name(), "supportNeedsOriginal");
    }

    #[rstest]
    fn date_of_birth_extraction_splits_parts_and_keeps_iso_baseline() {
        let record = json!({ "dateOfBirth": "1985-04-09" });

        let extracted = DATE_OF_BIRTH_FORM.extract(&record);

        assert_eq!(extracted.render["currentDobDay"], json!("9"));
        assert_eq!(extracted.render["currentDobMonth"], json!("4"));
        assert_eq!(extracted.render["currentDobYear"], json!("1985"));
        assert_eq!(extracted.render["existingDateOfBirth"], json!("1985-04-09"));
        assert_eq!(extracted.snapshot["dateOfBirth"], json!("1985-04-09"));
    }

    #[rstest]
    #[case("31", "4", "2024", "Date of birth must be a real date")]
    #[case("29", "2", "2023", "Date of birth must be a real date")]
    #[case("", "2", "2024", "Enter the client's date of birth")]
    fn date_of_birth_rejects_bad_dates(
        #[case] day: &str,
        #[case] month: &str,
        #[case] year: &str,
        #[case] expected: &str,
    ) {
        let body = submission(&[("dobDay", day), ("dobMonth", month), ("dobYear", year)]);
        let errors = DATE_OF_BIRTH_FORM.validator().validate(&body, None);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].summary_message, expected);
    }

    #[rstest]
    fn date_of_birth_leap_day_is_accepted() {
        let body = submission(&[
            ("dobDay", "29"),
            ("dobMonth", "2"),
            ("dobYear", "2024"),
            ("existingDateOfBirth", "1985-04-09"),
        ]);

        assert!(DATE_OF_BIRTH_FORM.validator().validate(&body, None).is_empty());
    }

    #[rstest]
    fn date_of_birth_unchanged_resubmission_is_rejected() {
        let body = submission(&[
            ("dobDay", "9"),
            ("dobMonth", "4"),
            ("dobYear", "1985"),
            ("existingDateOfBirth", "1985-04-09"),
        ]);

        let errors = DATE_OF_BIRTH_FORM.validator().validate(&body, None);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].summary_message, "Update the client's date of birth");
    }

    #[rstest]
    fn date_of_birth_future_date_is_rejected() {
        let body = submission(&[("dobDay", "1"), ("dobMonth", "1"), ("dobYear", "2999")]);
        let errors = DATE_OF_BIRTH_FORM.validator().validate(&body, None);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].summary_message, "Date of birth must be in the past");
    }

    #[rstest]
    fn third_party_payload_nests_under_third_party() {
        let body = submission(&[
            ("thirdPartyFullName", "Sam Carer"),
            ("thirdPartyRelationship", "Support worker"),
            ("thirdPartyEmailAddress", "sam@example.org"),
            ("thirdPartyPhoneNumber", "0113 496 0000"),
        ]);

        let payload = (THIRD_PARTY_FORM.payload)(&body);

        assert_eq!(payload["thirdParty"]["fullName"], "Sam Carer");
        assert_eq!(payload["thirdParty"]["relationshipToClient"], "Support worker");
        assert_eq!(payload["thirdParty"]["emailAddress"], "sam@example.org");
    }

    #[rstest]
    fn support_needs_payload_maps_membership_to_yes_no() {
        let body = submission(&[
            ("supportNeeds", "bslWebcam"),
            ("supportNeeds", "languageSelection"),
            ("languageSelection", "Welsh"),
            ("otherSupport", ""),
        ]);

        let payload = (SUPPORT_NEEDS_FORM.payload)(&body);
        let needs = &payload["clientSupportNeeds"];

        assert_eq!(needs["bslWebcam"], "yes");
        assert_eq!(needs["textRelay"], "no");
        assert_eq!(needs["callbackPreferred"], "no");
        assert_eq!(needs["languageSelection"], "Welsh");
        assert_eq!(needs["otherSupport"], "");
    }

    #[rstest]
    fn support_needs_reveal_panels_open_from_record_text() {
        let record = json!({
            "clientSupportNeeds": {
                "bslWebcam": "no",
                "textRelay": "yes",
                "otherSupport": "Large print letters",
            }
        });

        let extracted = SUPPORT_NEEDS_FORM.extract(&record);

        assert_eq!(
            extracted.render["currentSupportNeeds"],
            json!(["textRelay", "otherSupport"])
        );
        assert_eq!(extracted.render["currentOtherSupport"], json!("Large print letters"));
    }

    #[rstest]
    fn operator_feedback_requires_type_and_comment() {
        let body = submission(&[("feedbackType", ""), ("feedbackComment", "")]);
        let errors = OPERATOR_FEEDBACK_FORM.validator().validate(&body, None);

        assert_eq!(errors.len(), 2);
    }

    #[rstest]
    fn extractor_and_validator_agree_on_normalisation() {
        // Extract a record, resubmit exactly the extracted values: the only
        // acceptable complaint is "unchanged".
        let record = json!({ "fullName": "Jane Doe" });
        let extracted = CLIENT_NAME_FORM.extract(&record);

        let body = submission(&[
            ("fullName", extracted.snapshot["fullName"].as_str().unwrap()),
            ("existingFullName", extracted.render["existingFullName"].as_str().unwrap()),
        ]);

        let errors = CLIENT_NAME_FORM.validator().validate(&body, None);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].summary_message, "Update the client's name");
    }
}
