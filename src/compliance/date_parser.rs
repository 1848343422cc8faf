//! Flexible date parsing.
//!
//! HR data carries dates typed by hand or imported from spreadsheets, in
//! either `YYYY-MM-DD` or `DD-MM-YYYY` order with `-` or `/` separators.
//! Malformed input is an expected case here, so parsing yields an `Option`
//! rather than an error.

use chrono::NaiveDate;

/// Smallest accepted year. Two-digit years are ambiguous.
pub const MIN_YEAR: u32 = 100;

/// Largest accepted year.
pub const MAX_YEAR: u32 = 9999;

/// Parses a calendar date from text.
///
/// Accepts exactly three numeric parts separated by `-` or `/`. When the
/// first part has four digits the order is year, month, day; otherwise it
/// is day, month, year. The result must be a real calendar date, so
/// `2024-02-30` is rejected rather than rolled over into March.
///
/// Returns `None` for empty input, a wrong number of parts, non-numeric
/// parts, a year outside [`MIN_YEAR`]..=[`MAX_YEAR`], or a day that does
/// not exist.
///
/// # Examples
///
/// ```
/// use compliance_engine::compliance::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2023, 1, 10);
/// assert_eq!(parse_date("2023-01-10"), expected);
/// assert_eq!(parse_date("10/01/2023"), expected);
/// assert_eq!(parse_date("2023-02-30"), None);
/// assert_eq!(parse_date("31-04-2023"), None);
/// assert_eq!(parse_date("2023/13/01"), None);
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let parts: Vec<&str> = text.split(['-', '/']).collect();
    if parts.len() != 3 {
        return None;
    }

    let numbers = parts
        .iter()
        .map(|part| parse_number(part))
        .collect::<Option<Vec<u32>>>()?;

    let (year, month, day) = if parts[0].len() == 4 {
        (numbers[0], numbers[1], numbers[2])
    } else {
        (numbers[2], numbers[1], numbers[0])
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Formats a date the way [`parse_date`] reads it back (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use compliance_engine::compliance::{format_date, parse_date};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// assert_eq!(format_date(date), "2024-02-29");
/// assert_eq!(parse_date(&format_date(date)), Some(date));
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
