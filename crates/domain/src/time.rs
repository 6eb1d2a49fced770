//! Clock and calendar types shared by the hospital records.

use chrono::{DateTime, NaiveDate, Utc};

/// Instant in UTC: reservation periods, prescription issue times, token
/// `iat`/`exp` claims.
pub type Timestamp = DateTime<Utc>;

/// Calendar date without a time zone (birth dates, hiring dates).
pub type Date = NaiveDate;

/// Current instant, used as the default `issued_at` of a prescription and as
/// the issue time of access tokens.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
