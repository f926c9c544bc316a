//! Stateless validation rules shared by request validation and the partial
//! update engine.
//!
//! Each rule is a plain predicate paired with the message callers report
//! when it fails.

use chrono::{Local, NaiveDate};

/// Canonical textual date layout, `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DATE_FORMAT_MESSAGE: &str = "Not valid date format. Use format yyyy-MM-dd";
pub const PAST_DATE_MESSAGE: &str = "birthDate must be earlier than current date";
pub const DATE_RANGE_MESSAGE: &str =
    "Invalid date range: 'From' date must be earlier than 'To' date.";
pub const INVALID_BIRTH_DATE_MESSAGE: &str = "Invalid birth date. Check again";

pub fn age_message(minimum_age: u32) -> String {
    format!("birthDate must be at least {} years ago", minimum_age)
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Valid iff `birth_date` is present and at least `minimum_age` whole years
/// lie between it and `today`.
pub fn is_old_enough(birth_date: Option<NaiveDate>, minimum_age: u32, today: NaiveDate) -> bool {
    birth_date
        .and_then(|birth| today.years_since(birth))
        .map_or(false, |years| years >= minimum_age)
}

/// Valid iff the date survives a round trip through `YYYY-MM-DD`.
pub fn has_canonical_format(date: NaiveDate) -> bool {
    date.format(DATE_FORMAT).to_string() == date.to_string()
}

/// Valid iff both bounds are present and `from` is strictly before `to`.
pub fn is_ordered_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => from < to,
        _ => false,
    }
}

pub fn is_in_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn is_not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Minimal `local@domain` shape check.
pub fn is_well_formed_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Strict `YYYY-MM-DD` parse; the text must be exactly the canonical
/// rendering of the parsed date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .filter(|date| has_canonical_format(*date) && date.format(DATE_FORMAT).to_string() == text)
}
