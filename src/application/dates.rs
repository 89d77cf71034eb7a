//! Calendar-realism checks for date-of-birth style inputs.
//!
//! Day, month, and year arrive as separate text inputs. They are parsed as
//! integers, a calendar date is constructed, and validity is confirmed by
//! round-tripping the year/month/day after construction, so `31/4/2024`
//! (April has 30 days) is rejected while `29/2/2024` (leap year) is
//! accepted.
//!
//! "Not in the future" compares against the end of the current day in the
//! server's local time zone: a date of birth entered today is not a future
//! date.

use chrono::{Datelike, Local, NaiveDate};

/// Parses day/month/year strings into a calendar date.
///
/// Returns `None` when any part fails to parse as an integer or the parts
/// do not form a real calendar date.
#[must_use]
pub fn parse_date_parts(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    // Confirm the constructed date round-trips the input parts.
    if date.day() == day && date.month() == month && date.year() == year {
        Some(date)
    } else {
        None
    }
}

/// Whether day/month/year strings form a real calendar date.
#[must_use]
pub fn is_real_date(day: &str, month: &str, year: &str) -> bool {
    parse_date_parts(day, month, year).is_some()
}

/// Whether the date falls after the end of the current local day.
#[must_use]
pub fn is_in_future(date: NaiveDate) -> bool {
    date > Local::now().date_naive()
}

/// Formats a date as the ISO `YYYY-MM-DD` string the case API stores.
#[must_use]
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Splits an ISO `YYYY-MM-DD` string into (day, month, year) display parts.
///
/// Returns empty parts when the stored value is missing or malformed, so a
/// record with no date of birth renders three empty inputs.
#[must_use]
pub fn iso_date_parts(iso: &str) -> (String, String, String) {
    iso.parse::<NaiveDate>().map_or_else(
        |_| (String::new(), String::new(), String::new()),
        |date| {
            (
                date.day().to_string(),
                date.month().to_string(),
                date.year().to_string(),
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    #[rstest]
    #[case("31", "4", "2024", false)] // April has 30 days
    #[case("29", "2", "2024", true)] // leap year
    #[case("29", "2", "2023", false)]
    #[case("30", "4", "2024", true)]
    #[case("1", "1", "1900", true)]
    #[case("31", "13", "2024", false)]
    #[case("0", "1", "2024", false)]
    fn real_date_checks(
        #[case] day: &str,
        #[case] month: &str,
        #[case] year: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_real_date(day, month, year), expected);
    }

    #[rstest]
    #[case("abc", "2", "2024")]
    #[case("29", "", "2024")]
    #[case("29", "2", "20x4")]
    fn non_numeric_parts_are_not_real(#[case] day: &str, #[case] month: &str, #[case] year: &str) {
        assert!(!is_real_date(day, month, year));
    }

    #[rstest]
    fn parse_trims_whitespace() {
        let date = parse_date_parts(" 29 ", " 2 ", " 2024 ").unwrap();
        assert_eq!(to_iso_date(date), "2024-02-29");
    }

    #[rstest]
    fn today_is_not_in_the_future() {
        assert!(!is_in_future(Local::now().date_naive()));
    }

    #[rstest]
    fn tomorrow_is_in_the_future() {
        assert!(is_in_future(Local::now().date_naive() + Duration::days(1)));
    }

    #[rstest]
    fn iso_parts_round_trip() {
        assert_eq!(
            iso_date_parts("1985-04-09"),
            ("9".to_string(), "4".to_string(), "1985".to_string())
        );
    }

    #[rstest]
    fn malformed_iso_yields_empty_parts() {
        assert_eq!(
            iso_date_parts("not-a-date"),
            (String::new(), String::new(), String::new())
        );
    }
}
