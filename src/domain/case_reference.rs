//! Case reference value object.
//!
//! A case reference identifies one legal-aid client matter. References are
//! validated at the edge (controller entry) so that the rest of the pipeline
//! only ever sees well-formed values; an invalid reference renders a 400
//! page without touching the remote case API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for a case reference.
const MAX_CASE_REFERENCE_LENGTH: usize = 32;

/// Error returned when a raw case reference fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaseReferenceError {
    /// The reference was empty or only whitespace.
    #[error("case reference is empty")]
    Empty,

    /// The reference exceeded the maximum length.
    #[error("case reference exceeds {MAX_CASE_REFERENCE_LENGTH} characters")]
    TooLong,

    /// The reference contained a character outside `[A-Za-z0-9-]`.
    #[error("case reference contains invalid character: {0:?}")]
    InvalidCharacter(char),
}

/// A validated case reference.
///
/// Construct with [`CaseReference::parse`]; the inner string is guaranteed
/// to be non-empty, at most 32 characters, and limited to letters, digits,
/// and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseReference(String);

impl CaseReference {
    /// Parses and validates a raw case reference.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`CaseReferenceError`] when the trimmed value is empty, too
    /// long, or contains a character outside `[A-Za-z0-9-]`.
    pub fn parse(raw: &str) -> Result<Self, CaseReferenceError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CaseReferenceError::Empty);
        }

        if trimmed.len() > MAX_CASE_REFERENCE_LENGTH {
            return Err(CaseReferenceError::TooLong);
        }

        if let Some(invalid) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
        {
            return Err(CaseReferenceError::InvalidCharacter(invalid));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseReference {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PC-1922-1879")]
    #[case("300000001")]
    #[case("  PC-1922-1879  ")]
    fn parse_accepts_valid_references(#[case] raw: &str) {
        let reference = CaseReference::parse(raw).unwrap();
        assert_eq!(reference.as_str(), raw.trim());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn parse_rejects_empty(#[case] raw: &str) {
        assert_eq!(CaseReference::parse(raw), Err(CaseReferenceError::Empty));
    }

    #[rstest]
    fn parse_rejects_over_long_reference() {
        let raw = "X".repeat(MAX_CASE_REFERENCE_LENGTH + 1);
        assert_eq!(CaseReference::parse(&raw), Err(CaseReferenceError::TooLong));
    }

    #[rstest]
    #[case("PC 1922", ' ')]
    #[case("PC/1922", '/')]
    #[case("../etc", '.')]
    fn parse_rejects_invalid_characters(#[case] raw: &str, #[case] bad: char) {
        assert_eq!(
            CaseReference::parse(raw),
            Err(CaseReferenceError::InvalidCharacter(bad))
        );
    }

    #[rstest]
    fn display_round_trips_inner_value() {
        let reference = CaseReference::parse("PC-1922-1879").unwrap();
        assert_eq!(reference.to_string(), "PC-1922-1879");
    }
}
