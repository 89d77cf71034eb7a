//! Application layer: the edit-form pipeline.
//!
//! Pure functions and per-form configuration sitting between the HTTP
//! handlers and the collaborator interfaces. Everything here is
//! synchronous and side-effect free; the controller owns the I/O.

pub mod catalog;
pub mod change_detection;
pub mod dates;
pub mod extractor;
pub mod priority;
pub mod rules;
pub mod submission;
pub mod validator;

pub use catalog::{ExtractorChoice, FormConfig, UpdateOperation, ValidationChoice};
pub use extractor::{ExtractedFields, extract_current_fields};
pub use priority::{filter_errors_by_priority, rank_errors};
pub use submission::FormSubmission;
pub use validator::{CustomValidator, FormSchema, SchemaValidator, UnchangedRule, Validator};
