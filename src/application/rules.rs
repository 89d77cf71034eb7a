//! Format rules for text fields.
//!
//! Format checks only run on non-empty input; whether a field may be empty
//! is the required rule's concern.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::FormatRule;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]{6,18}$").expect("phone pattern compiles"));

/// Whether a trimmed, non-empty value satisfies the given format rule.
#[must_use]
pub fn matches_format(rule: FormatRule, value: &str) -> bool {
    match rule {
        FormatRule::Email => EMAIL_PATTERN.is_match(value),
        FormatRule::Phone => PHONE_PATTERN.is_match(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("jane.doe@example.org", true)]
    #[case("jane@legal-aid.gov.uk", true)]
    #[case("jane@example", false)]
    #[case("jane doe@example.org", false)]
    #[case("@example.org", false)]
    #[case("jane@", false)]
    fn email_format(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(matches_format(FormatRule::Email, value), expected);
    }

    #[rstest]
    #[case("0113 496 0000", true)]
    #[case("+44 113 496 0000", true)]
    #[case("(0113) 496-0000", true)]
    #[case("12345", false)]
    #[case("not a number", false)]
    #[case("0113 496 0000 extension 12345", false)]
    fn phone_format(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(matches_format(FormatRule::Phone, value), expected);
    }
}
