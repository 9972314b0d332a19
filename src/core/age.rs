use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Age in whole completed years on `today`
///
/// The age increments on the birthday itself. No validation is done: a
/// birth date after `today` yields a negative age.
#[inline]
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();

    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }

    age
}

/// Age of an optional birth date; `None` stays `None`
#[inline]
pub fn age_of(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> Option<i32> {
    date_of_birth.map(|dob| age_on(dob, today))
}

/// Parse a date of birth as sent by clients
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp or a naive `YYYY-MM-DDTHH:MM:SS`
/// timestamp. Anything else is `None`.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}
