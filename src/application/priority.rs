//! Priority-ranked error filtering for the summary list.
//!
//! The GOV.UK error-summary convention avoids showing several redundant
//! messages for one logical problem (for example "required" and "unchanged"
//! both firing). When more than one error applies, each error's priority is
//! looked up by its summary message text and only the errors sharing the
//! minimum (most important) priority survive. Field-level inline errors are
//! a separate, unfiltered map.

use crate::domain::{UNRANKED_PRIORITY, ValidationErrorRecord};

/// Assigns each error the priority its summary message has in the form's
/// priority map; messages not in the map keep the unranked sentinel.
#[must_use]
pub fn rank_errors(
    errors: Vec<ValidationErrorRecord>,
    priority_map: &[(&str, u32)],
) -> Vec<ValidationErrorRecord> {
    errors
        .into_iter()
        .map(|mut error| {
            error.priority = priority_map
                .iter()
                .find(|(message, _)| *message == error.summary_message)
                .map_or(UNRANKED_PRIORITY, |(_, priority)| *priority);
            error
        })
        .collect()
}

/// Keeps only the errors at the minimum priority.
///
/// A list of zero or one errors is returned unchanged, whatever its
/// priority.
#[must_use]
pub fn filter_errors_by_priority(
    errors: Vec<ValidationErrorRecord>,
) -> Vec<ValidationErrorRecord> {
    if errors.len() <= 1 {
        return errors;
    }

    let minimum = errors
        .iter()
        .map(|error| error.priority)
        .min()
        .unwrap_or(UNRANKED_PRIORITY);

    errors
        .into_iter()
        .filter(|error| error.priority == minimum)
        .collect()
}
