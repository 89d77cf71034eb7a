//! Domain layer: pure types for the edit-form pipeline.
//!
//! Nothing in this layer performs I/O. Case records themselves stay in the
//! shape the remote case API returns them (`serde_json::Value`); the typed
//! surface is the field descriptors that say how to read and diff them.

pub mod case_reference;
pub mod fields;
pub mod validation;

pub use case_reference::{CaseReference, CaseReferenceError};
pub use fields::{
    CheckboxOption, FieldBinding, FieldDescriptor, FieldKind, FieldValue, FormatRule,
    RevealOption, RuleMessage, RulePrecedence,
};
pub use validation::{ErrorTarget, UNRANKED_PRIORITY, ValidationErrorRecord};
