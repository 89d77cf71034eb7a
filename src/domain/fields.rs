//! Field descriptors and values for the edit-form pipeline.
//!
//! Each edit form declares its fields as static [`FieldDescriptor`] values.
//! A descriptor says where a field's current value lives in the fetched case
//! record, how it is rendered back to the template, which validation rules
//! apply, and in what order those rules run.
//!
//! # Field bindings
//!
//! Template keys are not derived by string concatenation at runtime; every
//! field carries an explicit [`FieldBinding`] naming its submitted key (the
//! input name the browser posts), its existing key (the hidden input that
//! round-trips the value shown at render time), and its display key (the
//! template variable holding the current value). This keeps the extractor,
//! the validator, and the templates agreeing on one set of names.

use serde::{Deserialize, Serialize};

/// The keys one form field is known by across the request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    /// Name of the form input the browser submits.
    pub submitted_key: &'static str,
    /// Name of the hidden input carrying the value shown at render time.
    pub existing_key: &'static str,
    /// Template variable holding the current value on first render.
    pub display_key: &'static str,
}

impl FieldBinding {
    /// Creates a binding from its three keys.
    #[must_use]
    pub const fn new(
        submitted_key: &'static str,
        existing_key: &'static str,
        display_key: &'static str,
    ) -> Self {
        Self {
            submitted_key,
            existing_key,
            display_key,
        }
    }
}

/// One checkbox option inside an item-list field.
///
/// `path` is resolved relative to the descriptor's `source_path` and is
/// expected to hold a boolean-like value in the case record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxOption {
    /// The value submitted when the checkbox is ticked.
    pub key: &'static str,
    /// Record sub-path holding the boolean-like flag.
    pub path: &'static str,
}

/// A synthetic checkbox key derived from a dependent text field.
///
/// When the text at `depends_on` (relative to `source_path`) is non-empty,
/// the key is appended to the extracted item list so the matching GOV.UK
/// checkbox "reveal" panel opens on first render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealOption {
    /// The synthetic key appended to the item list.
    pub key: &'static str,
    /// Record sub-path of the dependent text field.
    pub depends_on: &'static str,
}

/// How a field is extracted from the case record and diffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single text value; missing/non-string coerces to `""`.
    Text,
    /// A checkbox-style multi-select; missing coerces to `[]`.
    Items {
        /// Concrete options derived from boolean-like record flags.
        options: &'static [CheckboxOption],
        /// Synthetic options derived from dependent text fields.
        reveals: &'static [RevealOption],
    },
}

/// Which format rule applies to a non-empty text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    /// Must look like an email address.
    Email,
    /// Must look like a phone number.
    Phone,
}

/// Order in which validation rules run for a field.
///
/// Precedence is explicit per-form configuration, not a global rule: most
/// forms check required → format → unchanged, but some intentionally check
/// unchanged before format so that a no-op submission short-circuits the
/// format errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulePrecedence {
    /// required → format → unchanged (the common case).
    #[default]
    RequiredFormatUnchanged,
    /// required → unchanged → format (no-op short-circuits format checks).
    RequiredUnchangedFormat,
}

/// Inline and summary text for one validation rule failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMessage {
    /// Message rendered next to the field.
    pub inline: &'static str,
    /// Message rendered in the page-top error summary.
    pub summary: &'static str,
}

impl RuleMessage {
    /// Creates a message pair where inline and summary text are identical.
    #[must_use]
    pub const fn same(text: &'static str) -> Self {
        Self {
            inline: text,
            summary: text,
        }
    }
}

/// Static declaration of one edit-form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// The keys this field is known by.
    pub binding: FieldBinding,
    /// Extraction/diffing behaviour.
    pub kind: FieldKind,
    /// Dotted path to the field in the fetched case record.
    pub source_path: &'static str,
    /// Whether the extractor emits an `existing*` twin for change detection.
    pub include_existing: bool,
    /// Required-rule message; `None` means the field is optional.
    pub required: Option<RuleMessage>,
    /// Format rule and its message; `None` means no format check.
    pub format: Option<(FormatRule, RuleMessage)>,
    /// Order the rules run in for this field.
    pub precedence: RulePrecedence,
}

impl FieldDescriptor {
    /// A plain optional text field with no rules beyond change detection.
    #[must_use]
    pub const fn text(binding: FieldBinding, source_path: &'static str) -> Self {
        Self {
            binding,
            kind: FieldKind::Text,
            source_path,
            include_existing: true,
            required: None,
            format: None,
            precedence: RulePrecedence::RequiredFormatUnchanged,
        }
    }

    /// Returns a copy with a required-rule message attached.
    #[must_use]
    pub const fn required(mut self, message: RuleMessage) -> Self {
        self.required = Some(message);
        self
    }

    /// Returns a copy with a format rule attached.
    #[must_use]
    pub const fn format(mut self, rule: FormatRule, message: RuleMessage) -> Self {
        self.format = Some((rule, message));
        self
    }

    /// Returns a copy with the given rule precedence.
    #[must_use]
    pub const fn precedence(mut self, precedence: RulePrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Returns a copy that does not emit an `existing*` twin.
    #[must_use]
    pub const fn without_existing(mut self) -> Self {
        self.include_existing = false;
        self
    }
}

/// A field value flowing through the pipeline.
///
/// The tagged representation is decided once when a submission is parsed;
/// downstream code matches on the variant instead of sniffing shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A single text value.
    Text(String),
    /// A checkbox-style list of selected keys.
    Items(Vec<String>),
}

impl FieldValue {
    /// Whether the value is empty after normalisation (trimmed text, or an
    /// item list with no entries).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Items(items) => items.is_empty(),
        }
    }

    /// Returns the trimmed text, or `""` for item lists.
    #[must_use]
    pub fn as_trimmed_text(&self) -> &str {
        match self {
            Self::Text(text) => text.trim(),
            Self::Items(_) => "",
        }
    }

    /// Normalised equality: text compares trimmed, item lists compare as
    /// sorted sets.
    #[must_use]
    pub fn eq_normalised(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.trim() == b.trim(),
            (Self::Items(a), Self::Items(b)) => {
                let mut left: Vec<&str> = a.iter().map(|s| s.trim()).collect();
                let mut right: Vec<&str> = b.iter().map(|s| s.trim()).collect();
                left.sort_unstable();
                right.sort_unstable();
                left == right
            }
            _ => false,
        }
    }
}
