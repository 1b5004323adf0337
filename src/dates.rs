//! Calendar date and duration helpers for submission fields.
//!
//! Submitters type dates as `DD/MM/YYYY` and estimates as decimal hours. The
//! remote API expects ISO `YYYY-MM-DD` dates and ISO-8601 durations such as
//! `PT2H30M`. None of the helpers here panic or return errors: invalid input
//! is reported through `bool`, empty strings, or `None`.

use chrono::NaiveDate;

/// Human-readable shape of an accepted date, used in diagnostics.
pub const DATE_INPUT_FORMAT: &str = "DD/MM/YYYY";

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a strict `DD/MM/YYYY` date.
///
/// Returns `None` when the text does not have exactly two day digits, two
/// month digits, and four year digits separated by slashes, or when the
/// digits do not name a real calendar day (`31/02/2025`, year `0000`).
#[must_use]
pub fn parse(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let well_formed = bytes.iter().enumerate().all(|(index, byte)| match index {
        2 | 5 => *byte == b'/',
        _ => byte.is_ascii_digit(),
    });
    if !well_formed {
        return None;
    }

    let mut segments = input.split('/');
    let day = segments.next()?.parse::<u32>().ok()?;
    let month = segments.next()?.parse::<u32>().ok()?;
    let year = segments.next()?.parse::<i32>().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns `true` when the date is absent or a valid `DD/MM/YYYY` date.
///
/// Dates are optional fields, so `None` and the empty string are valid.
#[must_use]
pub fn validate(input: Option<&str>) -> bool {
    match input {
        None | Some("") => true,
        Some(text) => parse(text).is_some(),
    }
}

/// Converts a `DD/MM/YYYY` date to ISO `YYYY-MM-DD`.
///
/// Returns an empty string for absent, empty, or invalid input.
#[must_use]
pub fn convert_to_iso(input: Option<&str>) -> String {
    input
        .and_then(parse)
        .map(|date| date.format(ISO_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Formats a calendar date back into the submitter-facing `DD/MM/YYYY` form.
#[must_use]
pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Outcome of checking a start/due date pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateComparison {
    /// Either date is absent, or the due date is on or after the start date.
    Consistent,
    /// The due date falls before the start date.
    EndBeforeStart,
    /// At least one of the dates is not a valid `DD/MM/YYYY` date.
    Malformed,
}

impl DateComparison {
    /// Returns `true` when the pair is acceptable.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Consistent)
    }

    /// Returns the diagnostic message, empty for consistent pairs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Consistent => "",
            Self::EndBeforeStart => "end date precedes start date",
            Self::Malformed => "invalid date format, expected DD/MM/YYYY",
        }
    }
}

/// Compares a start and due date by calendar day.
///
/// Absent or empty dates are always consistent with anything.
#[must_use]
pub fn compare(start: Option<&str>, end: Option<&str>) -> DateComparison {
    let (Some(start), Some(end)) = (
        start.filter(|text| !text.is_empty()),
        end.filter(|text| !text.is_empty()),
    ) else {
        return DateComparison::Consistent;
    };

    match (parse(start), parse(end)) {
        (Some(start_date), Some(end_date)) if end_date < start_date => {
            DateComparison::EndBeforeStart
        }
        (Some(_), Some(_)) => DateComparison::Consistent,
        _ => DateComparison::Malformed,
    }
}

/// Hour quantity accepted by [`format_duration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hours<'a> {
    /// A numeric number of hours.
    Decimal(f64),
    /// Raw submitter text such as `"2.5"`.
    Text(&'a str),
}

impl From<f64> for Hours<'_> {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<i32> for Hours<'_> {
    fn from(value: i32) -> Self {
        Self::Decimal(f64::from(value))
    }
}

impl From<u32> for Hours<'_> {
    fn from(value: u32) -> Self {
        Self::Decimal(f64::from(value))
    }
}

impl<'a> From<&'a str> for Hours<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

/// Returns `true` when the text is a plain non-negative decimal number.
///
/// Accepts ASCII digits with at most one decimal point (`"3"`, `"2.5"`,
/// `".5"`). Signs, exponents, and whitespace are rejected.
#[must_use]
pub fn is_numeric_estimate(raw: &str) -> bool {
    let mut seen_digit = false;
    let mut seen_point = false;
    for ch in raw.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Formats a number of hours as an ISO-8601 duration.
///
/// Whole hours become the `H` segment and the fractional remainder becomes
/// minutes, truncated rather than rounded (`2.5` is `PT2H30M`, `1.999` is
/// `PT1H59M`). The minutes segment is omitted when it is zero (`PT3H`).
/// Negative, non-finite, or non-numeric input yields `None`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "hour fractions are converted to whole minutes"
)]
pub fn format_duration<'a>(hours: impl Into<Hours<'a>>) -> Option<String> {
    let value = match hours.into() {
        Hours::Decimal(value) => value,
        Hours::Text(raw) => {
            if !is_numeric_estimate(raw) {
                return None;
            }
            raw.parse::<f64>().ok()?
        }
    };
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let whole_hours = value.trunc();
    let minutes = ((value - whole_hours) * 60.0).trunc();
    if minutes > 0.0 {
        Some(format!("PT{whole_hours:.0}H{minutes:.0}M"))
    } else {
        Some(format!("PT{whole_hours:.0}H"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("15/05/2025"))]
    #[case(Some("29/02/2024"))]
    fn validate_accepts_absent_and_real_dates(#[case] input: Option<&str>) {
        assert!(validate(input));
    }

    #[rstest]
    #[case("31/02/2025")]
    #[case("29/02/2025")]
    #[case("2025-05-15")]
    #[case("5/5/2025")]
    #[case("15/05/25")]
    #[case("15-05-2025")]
    #[case("aa/bb/cccc")]
    #[case("00/05/2025")]
    #[case("15/13/2025")]
    #[case("15/05/0000")]
    #[case(" 15/05/2025")]
    fn validate_rejects_malformed_or_impossible_dates(#[case] input: &str) {
        assert!(!validate(Some(input)));
    }

    #[rstest]
    #[case(Some("15/05/2025"), "2025-05-15")]
    #[case(Some("01/01/2030"), "2030-01-01")]
    #[case(Some(""), "")]
    #[case(None, "")]
    #[case(Some("31/02/2025"), "")]
    #[case(Some("not a date"), "")]
    fn convert_to_iso_never_fails(#[case] input: Option<&str>, #[case] expected: &str) {
        assert_eq!(convert_to_iso(input), expected);
    }

    #[test]
    fn format_display_round_trips_parsed_dates() {
        let date = parse("09/11/2025").expect("valid date");
        assert_eq!(format_display(date), "09/11/2025");
    }

    #[rstest]
    #[case(Some("10/05/2025"), Some("09/05/2025"), DateComparison::EndBeforeStart)]
    #[case(Some("10/05/2025"), Some("10/05/2025"), DateComparison::Consistent)]
    #[case(Some("10/05/2025"), Some("11/06/2025"), DateComparison::Consistent)]
    #[case(None, Some("09/05/2025"), DateComparison::Consistent)]
    #[case(Some("10/05/2025"), Some(""), DateComparison::Consistent)]
    #[case(Some("10/05/2025"), Some("32/05/2025"), DateComparison::Malformed)]
    #[case(Some("2025-05-10"), Some("11/05/2025"), DateComparison::Malformed)]
    fn compare_orders_by_calendar_day(
        #[case] start: Option<&str>,
        #[case] end: Option<&str>,
        #[case] expected: DateComparison,
    ) {
        assert_eq!(compare(start, end), expected);
    }

    #[test]
    fn compare_reports_messages() {
        let same_day = compare(Some("10/05/2025"), Some("10/05/2025"));
        assert!(same_day.is_ok());
        assert_eq!(same_day.message(), "");

        let reversed = compare(Some("10/05/2025"), Some("09/05/2025"));
        assert!(!reversed.is_ok());
        assert_eq!(reversed.message(), "end date precedes start date");

        let malformed = compare(Some("10/05/2025"), Some("oops"));
        assert!(!malformed.is_ok());
        assert!(malformed.message().contains(DATE_INPUT_FORMAT));
    }

    #[rstest]
    #[case(Hours::Decimal(2.5), Some("PT2H30M"))]
    #[case(Hours::Decimal(3.0), Some("PT3H"))]
    #[case(Hours::Decimal(0.0), Some("PT0H"))]
    #[case(Hours::Decimal(0.25), Some("PT0H15M"))]
    #[case(Hours::Decimal(1.999), Some("PT1H59M"))]
    #[case(Hours::Decimal(-1.0), None)]
    #[case(Hours::Decimal(f64::NAN), None)]
    #[case(Hours::Text("2.5"), Some("PT2H30M"))]
    #[case(Hours::Text("8"), Some("PT8H"))]
    #[case(Hours::Text(".5"), Some("PT0H30M"))]
    #[case(Hours::Text("abc"), None)]
    #[case(Hours::Text(""), None)]
    #[case(Hours::Text("-2"), None)]
    #[case(Hours::Text("1.2.3"), None)]
    #[case(Hours::Text("1e3"), None)]
    fn format_duration_truncates_minutes(#[case] hours: Hours<'_>, #[case] expected: Option<&str>) {
        assert_eq!(format_duration(hours).as_deref(), expected);
    }

    #[test]
    fn format_duration_accepts_plain_numbers() {
        assert_eq!(format_duration(3).as_deref(), Some("PT3H"));
        assert_eq!(format_duration(2.5).as_deref(), Some("PT2H30M"));
        assert_eq!(format_duration("abc"), None);
    }

    #[rstest]
    #[case("2.5", true)]
    #[case("10", true)]
    #[case("2.", true)]
    #[case(".", false)]
    #[case("", false)]
    #[case("2,5", false)]
    #[case(" 2", false)]
    fn numeric_estimate_detection(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_numeric_estimate(raw), expected);
    }
}
